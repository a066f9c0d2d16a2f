//! Credential records and the credentials file format.
//!
//! # File Format
//!
//! ```yaml
//! - id: "1"
//!   name: John Admin
//!   email: admin@crm.com
//!   role: admin
//!   password: admin123
//! ```

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use affiliate_crm_core::{Email, Identity, IdentityId, Role};

use super::AuthError;

/// An identity together with the secret that unlocks it.
///
/// The secret stays here; only `identity` ever leaves the authenticator.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub identity: Identity,
    pub secret: SecretString,
}

impl CredentialRecord {
    /// Build a record from its parts.
    #[must_use]
    pub fn new(identity: Identity, secret: impl Into<String>) -> Self {
        Self {
            identity,
            secret: SecretString::from(secret.into()),
        }
    }
}

/// One entry of the credentials file.
#[derive(Debug, Deserialize)]
struct CredentialEntry {
    id: String,
    name: String,
    email: String,
    role: Role,
    password: String,
}

impl TryFrom<CredentialEntry> for CredentialRecord {
    type Error = AuthError;

    fn try_from(entry: CredentialEntry) -> Result<Self, Self::Error> {
        let email = Email::parse(&entry.email)
            .map_err(|e| AuthError::InvalidEntry(format!("{}: {e}", entry.email)))?;

        if entry.id.trim().is_empty() {
            return Err(AuthError::InvalidEntry(format!("{email}: id is empty")));
        }
        if entry.name.trim().is_empty() {
            return Err(AuthError::InvalidEntry(format!("{email}: name is empty")));
        }
        if entry.password.is_empty() {
            return Err(AuthError::InvalidEntry(format!("{email}: password is empty")));
        }

        Ok(Self::new(
            Identity {
                id: IdentityId::new(entry.id),
                name: entry.name,
                email,
                role: entry.role,
            },
            entry.password,
        ))
    }
}

/// Parse credential records from YAML.
///
/// # Errors
///
/// Returns `AuthError::CredentialsParse` for malformed YAML and
/// `AuthError::InvalidEntry` for entries that fail validation.
pub fn parse_credentials(yaml: &str) -> Result<Vec<CredentialRecord>, AuthError> {
    let entries: Vec<CredentialEntry> = serde_yaml::from_str(yaml)?;
    entries.into_iter().map(CredentialRecord::try_from).collect()
}

/// Read and parse a credentials file.
///
/// # Errors
///
/// Returns `AuthError::CredentialsFile` if the file cannot be read, otherwise
/// the errors of [`parse_credentials`].
pub fn load_credentials(path: &Path) -> Result<Vec<CredentialRecord>, AuthError> {
    let yaml = std::fs::read_to_string(path).map_err(|source| AuthError::CredentialsFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_credentials(&yaml)
}

/// The fixed demonstration credential set: one admin, one agent.
///
/// | email         | secret   | role  |
/// |---------------|----------|-------|
/// | admin@crm.com | admin123 | admin |
/// | agent@crm.com | agent123 | agent |
#[must_use]
pub fn demo_credentials() -> Vec<CredentialRecord> {
    vec![
        demo_record("1", "John Admin", "admin@crm.com", Role::Admin, "admin123"),
        demo_record("2", "Sarah Agent", "agent@crm.com", Role::Agent, "agent123"),
    ]
}

fn demo_record(id: &str, name: &str, email: &str, role: Role, secret: &str) -> CredentialRecord {
    CredentialRecord::new(
        Identity {
            id: IdentityId::new(id),
            name: name.to_string(),
            // Hard-coded addresses are known to be well-formed.
            email: Email::parse(email).unwrap_or_else(|_| unreachable!("invalid demo email")),
            role,
        },
        secret,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_demo_credentials() {
        let records = demo_credentials();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identity.role, Role::Admin);
        assert_eq!(records[0].secret.expose_secret(), "admin123");
        assert_eq!(records[1].identity.email.as_str(), "agent@crm.com");
    }

    #[test]
    fn test_parse_credentials() {
        let yaml = r#"
- id: "7"
  name: Dana Admin
  email: Dana@Example.com
  role: admin
  password: s3cret
- id: "8"
  name: Eli Agent
  email: eli@example.com
  role: agent
  password: hunter2
"#;
        let records = parse_credentials(yaml).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identity.email.as_str(), "dana@example.com");
        assert_eq!(records[1].identity.role, Role::Agent);
        assert_eq!(records[1].secret.expose_secret(), "hunter2");
    }

    #[test]
    fn test_parse_credentials_rejects_bad_entries() {
        let bad_email = "- {id: '1', name: A, email: nope, role: admin, password: x}";
        assert!(matches!(
            parse_credentials(bad_email),
            Err(AuthError::InvalidEntry(_))
        ));

        let empty_password = "- {id: '1', name: A, email: a@b.c, role: admin, password: ''}";
        assert!(matches!(
            parse_credentials(empty_password),
            Err(AuthError::InvalidEntry(_))
        ));

        let bad_role = "- {id: '1', name: A, email: a@b.c, role: owner, password: x}";
        assert!(matches!(
            parse_credentials(bad_role),
            Err(AuthError::CredentialsParse(_))
        ));
    }

    #[test]
    fn test_load_credentials_missing_file() {
        let err = load_credentials(Path::new("/nonexistent/credentials.yaml")).unwrap_err();
        assert!(matches!(err, AuthError::CredentialsFile { .. }));
    }
}

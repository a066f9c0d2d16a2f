//! Credential authentication service.
//!
//! Validates an email/secret pair against a fixed credential set and hands
//! back the matching [`Identity`]. The secret is never part of the result.

mod credentials;
mod error;

pub use credentials::{CredentialRecord, demo_credentials, load_credentials, parse_credentials};
pub use error::AuthError;

use std::collections::HashMap;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::instrument;

use affiliate_crm_core::{Email, Identity};

use crate::config::AdminConfig;

/// Authenticates credentials against a known identity set.
///
/// Lookups use the normalized (trimmed, lower-cased) email. The secret must
/// match exactly. Every attempt waits for the configured latency first,
/// standing in for a remote call; nothing is retried.
#[derive(Debug)]
pub struct Authenticator {
    records: HashMap<String, CredentialRecord>,
    latency: Duration,
}

impl Authenticator {
    /// Create an authenticator over `records`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEntry` if two records share an email.
    pub fn new(
        records: impl IntoIterator<Item = CredentialRecord>,
        latency: Duration,
    ) -> Result<Self, AuthError> {
        let mut by_email = HashMap::new();
        for record in records {
            let key = Email::normalize(record.identity.email.as_str());
            if by_email.contains_key(&key) {
                return Err(AuthError::InvalidEntry(format!("duplicate email: {key}")));
            }
            by_email.insert(key, record);
        }

        Ok(Self {
            records: by_email,
            latency,
        })
    }

    /// Authenticator over the built-in demo credentials.
    #[must_use]
    pub fn demo(latency: Duration) -> Self {
        let records = demo_credentials()
            .into_iter()
            .map(|r| (Email::normalize(r.identity.email.as_str()), r))
            .collect();
        Self { records, latency }
    }

    /// Build the authenticator described by the configuration: the
    /// credentials file when one is configured, the demo set otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the credentials file cannot be loaded.
    pub fn from_config(config: &AdminConfig) -> Result<Self, AuthError> {
        let latency = config.latency.login;
        match &config.credentials_file {
            Some(path) => {
                let records = load_credentials(path)?;
                tracing::info!(
                    path = %path.display(),
                    count = records.len(),
                    "Loaded credentials file"
                );
                Self::new(records, latency)
            }
            None => {
                tracing::warn!("No CRM_CREDENTIALS_FILE set, using demo credentials");
                Ok(Self::demo(latency))
            }
        }
    }

    /// Validate `email`/`secret` and return the matching identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no record matches the
    /// normalized email or the secret differs.
    #[instrument(skip(self, secret))]
    pub async fn authenticate(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let record = self
            .records
            .get(&Email::normalize(email))
            .filter(|record| record.secret.expose_secret() == secret);

        match record {
            Some(record) => {
                tracing::info!(
                    identity_id = %record.identity.id,
                    role = %record.identity.role,
                    "Authentication succeeded"
                );
                Ok(record.identity.clone())
            }
            None => {
                tracing::warn!("Authentication failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Number of known identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no identities are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use affiliate_crm_core::{IdentityId, Role};

    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::demo(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_authenticate_admin() {
        let identity = authenticator()
            .authenticate("admin@crm.com", "admin123")
            .await
            .unwrap();
        assert_eq!(identity.id, IdentityId::new("1"));
        assert_eq!(identity.name, "John Admin");
        assert_eq!(identity.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_authenticate_is_case_insensitive_on_email() {
        let auth = authenticator();
        let mixed = auth.authenticate("Admin@Crm.Com", "admin123").await.unwrap();
        let lower = auth.authenticate("admin@crm.com", "admin123").await.unwrap();
        assert_eq!(mixed, lower);

        let padded = auth.authenticate("  AGENT@crm.com ", "agent123").await.unwrap();
        assert_eq!(padded.role, Role::Agent);
    }

    #[tokio::test]
    async fn test_wrong_secret_and_unknown_email_fail_identically() {
        let auth = authenticator();
        let wrong_secret = auth.authenticate("admin@crm.com", "admin124").await.unwrap_err();
        let unknown = auth.authenticate("nobody@crm.com", "admin123").await.unwrap_err();

        assert!(matches!(wrong_secret, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong_secret.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_secret_must_match_exactly() {
        let auth = authenticator();
        assert!(auth.authenticate("admin@crm.com", "ADMIN123").await.is_err());
        assert!(auth.authenticate("admin@crm.com", " admin123").await.is_err());
        assert!(auth.authenticate("admin@crm.com", "").await.is_err());
    }

    #[tokio::test]
    async fn test_other_identity_secret_is_rejected() {
        let auth = authenticator();
        assert!(auth.authenticate("admin@crm.com", "agent123").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let auth = Authenticator::demo(Duration::from_millis(800));
        let started = tokio::time::Instant::now();
        auth.authenticate("agent@crm.com", "agent123").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[test]
    fn test_duplicate_emails_rejected() {
        let mut records = demo_credentials();
        records.push(records[0].clone());
        assert!(matches!(
            Authenticator::new(records, Duration::ZERO),
            Err(AuthError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_from_config_defaults_to_demo() {
        let auth = Authenticator::from_config(&AdminConfig::default()).unwrap();
        assert_eq!(auth.len(), 2);
    }
}

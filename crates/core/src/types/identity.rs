//! Authenticated identity.

use serde::{Deserialize, Serialize};

use super::{Email, IdentityId, Role};

/// An authenticated user.
///
/// Issued by the authenticator and never mutated afterwards; a profile change
/// replaces the whole value. This is exactly what gets serialized into the
/// client's session entry, so it must never carry secret material.
///
/// Deserialization rejects a blank id or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredIdentity")]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: Email,
    pub role: Role,
}

/// Errors rejecting a deserialized [`Identity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity id cannot be empty")]
    EmptyId,
    #[error("identity name cannot be empty")]
    EmptyName,
}

#[derive(Deserialize)]
struct StoredIdentity {
    id: IdentityId,
    name: String,
    email: Email,
    role: Role,
}

impl TryFrom<StoredIdentity> for Identity {
    type Error = IdentityError;

    fn try_from(stored: StoredIdentity) -> Result<Self, Self::Error> {
        if stored.id.as_str().trim().is_empty() {
            return Err(IdentityError::EmptyId);
        }
        if stored.name.trim().is_empty() {
            return Err(IdentityError::EmptyName);
        }
        Ok(Self {
            id: stored.id,
            name: stored.name,
            email: stored.email,
            role: stored.role,
        })
    }
}

impl Identity {
    /// First word of the display name (used in greetings).
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    /// Up to two upper-cased initials for the avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// Up to two upper-cased initials of a display name.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

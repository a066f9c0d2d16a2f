//! Session state for the signed-in identity.
//!
//! A [`SessionStore`] is built per request over that client's
//! [`SessionStorage`]. It holds the current [`Identity`] in memory and mirrors
//! it into durable storage as a JSON string under [`keys::CURRENT_USER`].
//!
//! # State Machine
//!
//! ```text
//!              set(identity)
//!   Anonymous ───────────────▶ Authenticated ──┐
//!       ▲                          │           │ set(identity)
//!       └──────── clear() ─────────┘ ◀─────────┘ (identity replaced)
//! ```
//!
//! The initial state is whatever [`SessionStore::restore`] finds. Missing or
//! malformed entries both mean `Anonymous`; a malformed entry is never
//! surfaced as an error.

pub mod notice;
pub mod storage;

use affiliate_crm_core::Identity;
use thiserror::Error;

pub use notice::{Notice, NoticeVariant, push_notice, take_notices};
pub use storage::{MemoryStorage, SessionStorage};

use crate::models::session_keys as keys;

/// Errors raised by session storage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The storage backend failed to read or write.
    #[error("session storage error: {0}")]
    Backend(String),

    /// The stored entry could not be decoded. Recovered as "logged out".
    #[error("malformed session data: {0}")]
    MalformedSessionData(#[source] serde_json::Error),

    /// A value could not be encoded for storage.
    #[error("failed to encode session data: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SessionError {
    pub(crate) fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Whether a session currently holds an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// The current identity of one client, mirrored into durable storage.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<Identity>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Open a store over `storage`, restoring any persisted identity.
    pub async fn open(storage: S) -> Self {
        let mut store = Self {
            storage,
            current: None,
        };
        store.restore().await;
        store
    }

    /// Re-read the persisted identity into memory.
    ///
    /// Returns `None` when nothing is stored, when the entry is malformed, or
    /// when the backend cannot be read.
    pub async fn restore(&mut self) -> Option<Identity> {
        let identity = match self.storage.load(keys::CURRENT_USER).await {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::debug!(error = %e, "Ignoring stored session entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session storage");
                None
            }
        };

        self.current.clone_from(&identity);
        identity
    }

    /// Store `identity` durably and in memory, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the identity cannot be written. The
    /// in-memory identity is left unchanged in that case.
    pub async fn set(&mut self, identity: Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&identity).map_err(SessionError::Encode)?;
        self.storage.store(keys::CURRENT_USER, raw).await?;
        self.current = Some(identity);
        Ok(())
    }

    /// Forget the current identity in memory and in durable storage.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the durable entry cannot be removed. The
    /// in-memory identity is cleared regardless.
    pub async fn clear(&mut self) -> Result<(), SessionError> {
        self.current = None;
        self.storage.delete(keys::CURRENT_USER).await
    }

    /// The identity held in memory. No I/O.
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Current state of the session state machine.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

fn decode(raw: &str) -> Result<Identity, SessionError> {
    serde_json::from_str(raw).map_err(SessionError::MalformedSessionData)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use affiliate_crm_core::{Email, IdentityId, Role};

    use super::*;

    fn identity(id: &str, name: &str, email: &str, role: Role) -> Identity {
        Identity {
            id: IdentityId::new(id),
            name: name.to_string(),
            email: Email::parse(email).unwrap(),
            role,
        }
    }

    fn admin() -> Identity {
        identity("1", "John Admin", "admin@crm.com", Role::Admin)
    }

    fn agent() -> Identity {
        identity("2", "Sarah Agent", "agent@crm.com", Role::Agent)
    }

    #[tokio::test]
    async fn test_open_on_empty_storage_is_anonymous() {
        let store = SessionStore::open(MemoryStorage::new()).await;
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_set_then_restore_round_trips() {
        let storage = MemoryStorage::new();
        for identity in [admin(), agent()] {
            let mut store = SessionStore::open(storage.clone()).await;
            store.set(identity.clone()).await.unwrap();
            assert_eq!(store.current(), Some(&identity));

            let mut fresh = SessionStore::open(storage.clone()).await;
            assert_eq!(fresh.current(), Some(&identity));
            assert_eq!(fresh.restore().await, Some(identity));
        }
    }

    #[tokio::test]
    async fn test_clear_empties_memory_and_storage() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::open(storage.clone()).await;
        store.set(admin()).await.unwrap();

        store.clear().await.unwrap();
        assert!(store.current().is_none());
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.raw(keys::CURRENT_USER).is_none());

        let mut fresh = SessionStore::open(storage).await;
        assert!(fresh.current().is_none());
        assert!(fresh.restore().await.is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_existing_identity() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::open(storage.clone()).await;
        store.set(admin()).await.unwrap();

        let renamed = identity("1", "Johnny Admin", "admin@crm.com", Role::Admin);
        store.set(renamed.clone()).await.unwrap();
        assert_eq!(store.state(), SessionState::Authenticated);
        assert_eq!(store.current(), Some(&renamed));

        let fresh = SessionStore::open(storage).await;
        assert_eq!(fresh.current(), Some(&renamed));
    }

    #[tokio::test]
    async fn test_malformed_entries_restore_as_absent() {
        for raw in [
            "not json",
            "{}",
            r#"{"id":"1","name":"X","email":"x@crm.com","role":"owner"}"#,
            r#"{"id":"","name":"","email":"NOT AN EMAIL","role":"admin"}"#,
            r#"{"id":"1","name":"John Admin","email":"NOT AN EMAIL","role":"admin"}"#,
            "null",
        ] {
            let storage = MemoryStorage::new();
            storage.put_raw(keys::CURRENT_USER, raw);
            let mut store = SessionStore::open(storage).await;
            assert!(store.current().is_none(), "entry {raw:?} should be ignored");
            assert!(store.restore().await.is_none());
        }
    }

    #[tokio::test]
    async fn test_malformed_entry_is_overwritten_by_set() {
        let storage = MemoryStorage::new();
        storage.put_raw(keys::CURRENT_USER, "garbage");
        let mut store = SessionStore::open(storage.clone()).await;
        store.set(agent()).await.unwrap();

        let fresh = SessionStore::open(storage).await;
        assert_eq!(fresh.current(), Some(&agent()));
    }

    #[tokio::test]
    async fn test_stored_layout_is_plain_identity_json() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::open(storage.clone()).await;
        store.set(admin()).await.unwrap();

        let raw = storage.raw(keys::CURRENT_USER).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "1",
                "name": "John Admin",
                "email": "admin@crm.com",
                "role": "admin",
            })
        );
    }
}

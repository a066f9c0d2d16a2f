//! Durable per-client key/value storage behind the session store.
//!
//! Two backends are provided:
//!
//! - [`tower_sessions::Session`] - the cookie-keyed server-side session of the
//!   current HTTP client (production)
//! - [`MemoryStorage`] - a shared in-process map (tests and tooling)

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tower_sessions::Session;

use super::SessionError;

/// A single client's durable string storage.
///
/// Each write fully replaces the previous value under the key, so no
/// transactional guarantees are needed.
pub trait SessionStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>, SessionError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Remove the value stored under `key`, if any.
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), SessionError>> + Send;
}

impl SessionStorage for Session {
    async fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.get::<String>(key).await.map_err(SessionError::backend)
    }

    async fn store(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.insert(key, value).await.map_err(SessionError::backend)
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.remove_value(key)
            .await
            .map(|_| ())
            .map_err(SessionError::backend)
    }
}

/// In-memory storage shared between clones.
///
/// Cloning yields another handle onto the same entries, which is how tests
/// model "a fresh store instance over the same durable storage".
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, bypassing the async interface.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Write a raw value under `key`, bypassing the async interface.
    pub fn put_raw(&self, key: &str, value: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.into());
        }
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> Result<T, SessionError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| SessionError::Backend("memory storage lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl SessionStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    async fn store(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.with_entries(|entries| {
            entries.insert(key.to_owned(), value);
        })
    }

    async fn delete(&self, key: &str) -> Result<(), SessionError> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

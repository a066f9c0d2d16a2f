//! One-shot notices carried to the next rendered page.
//!
//! A handler that redirects pushes a [`Notice`]; the page that renders next
//! takes it, which removes it from storage.

use serde::{Deserialize, Serialize};

use super::{SessionError, SessionStorage};
use crate::models::session_keys as keys;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Success,
    Destructive,
}

impl NoticeVariant {
    /// CSS class suffix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Destructive => "destructive",
        }
    }
}

/// A titled message shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Success,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// Whether this notice reports a failure.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

/// Queue `notice` for the next page, after any already pending.
///
/// # Errors
///
/// Returns `SessionError` if storage cannot be read or written.
pub async fn push_notice<S: SessionStorage>(storage: &S, notice: Notice) -> Result<(), SessionError> {
    let mut pending = match read_pending(storage).await {
        Ok(pending) => pending,
        Err(SessionError::MalformedSessionData(_)) => Vec::new(),
        Err(e) => return Err(e),
    };
    pending.push(notice);
    let raw = serde_json::to_string(&pending).map_err(SessionError::Encode)?;
    storage.store(keys::NOTICE, raw).await
}

/// Remove and return every pending notice.
///
/// Storage failures and unreadable entries yield no notices. Storage is only
/// written when something was pending.
pub async fn take_notices<S: SessionStorage>(storage: &S) -> Vec<Notice> {
    let raw = match storage.load(keys::NOTICE).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read notices");
            return Vec::new();
        }
    };

    if let Err(e) = storage.delete(keys::NOTICE).await {
        tracing::warn!(error = %e, "Failed to clear notices");
    }

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Dropping unreadable notices");
        Vec::new()
    })
}

async fn read_pending<S: SessionStorage>(storage: &S) -> Result<Vec<Notice>, SessionError> {
    match storage.load(keys::NOTICE).await? {
        Some(raw) => serde_json::from_str(&raw).map_err(SessionError::MalformedSessionData),
        None => Ok(Vec::new()),
    }
}

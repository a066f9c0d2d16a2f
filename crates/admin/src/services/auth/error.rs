//! Authentication error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong secret. Both cases are reported identically.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The credentials file could not be read.
    #[error("failed to read credentials file {path}: {source}")]
    CredentialsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The credentials file is not valid YAML for a credential list.
    #[error("failed to parse credentials file: {0}")]
    CredentialsParse(#[from] serde_yaml::Error),

    /// A credential entry failed validation.
    #[error("invalid credential entry: {0}")]
    InvalidEntry(String),
}

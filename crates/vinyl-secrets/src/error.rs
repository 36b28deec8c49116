//! Error types for vinyl-secrets

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for secret operations
pub type Result<T> = std::result::Result<T, SecretError>;

/// Errors that can occur while resolving or storing secrets.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SecretError {
    /// No secret with this name exists in the backend.
    #[error("secret not found: {name}")]
    NotFound {
        /// Secret name
        name: String,
    },

    /// The name is empty, too long, or contains characters other than
    /// ASCII letters, digits and `-`.
    #[error("invalid secret name '{name}': {reason}")]
    InvalidName {
        /// Offending name
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// The backend does not support writes.
    #[error("secret backend '{backend}' is read-only")]
    ReadOnly {
        /// Backend name
        backend: &'static str,
    },

    /// Reading or writing a secret file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl SecretError {
    /// Creates a not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        SecretError::NotFound { name: name.into() }
    }

    /// Wrap an I/O error with the path it happened at.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SecretError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SecretError::NotFound { .. } | SecretError::InvalidName { .. } | SecretError::ReadOnly { .. }
        )
    }
}

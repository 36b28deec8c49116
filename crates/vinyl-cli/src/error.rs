//! Error types for vinyl-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for vinyl-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vinyl-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Bad or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system failure at a known path.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Network failure while binding or serving.
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    /// Error from vinyl-store
    #[error(transparent)]
    Store(#[from] vinyl_store::Error),

    /// Error from vinyl-art
    #[error(transparent)]
    Art(#[from] vinyl_art::ArtError),

    /// Error from vinyl-secrets
    #[error(transparent)]
    Secret(#[from] vinyl_secrets::SecretError),

    /// Error from vinyl-auth
    #[error(transparent)]
    Auth(#[from] vinyl_auth::AuthError),
}

impl Error {
    /// Configuration error with `msg`.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// I/O error annotated with `path`.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

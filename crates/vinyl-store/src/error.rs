//! Error types for vinyl-store

use thiserror::Error;

/// Result type alias for vinyl-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vinyl-store
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from vinyl-core (validation, not found, promo code, ...)
    #[error(transparent)]
    Core(#[from] vinyl_core::Error),

    /// Error from vinyl-art
    #[error("Album art error: {0}")]
    Art(#[from] vinyl_art::ArtError),

    /// The embedded seed catalog could not be parsed
    #[error("Seed data error: {0}")]
    SeedData(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Core(e) => e.is_client_error(),
            Error::Art(_) | Error::SeedData(_) => false,
        }
    }

    /// The wrapped core error, if any.
    pub fn as_core(&self) -> Option<&vinyl_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            _ => None,
        }
    }
}

//! Error types for the Vinyl storefront.

use crate::validation::ValidationErrors;

/// Errors that can occur while working with the store.
///
/// Marked `#[non_exhaustive]` so new failure kinds can be added without
/// breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// One or more input fields failed validation.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (e.g. "album")
        entity: &'static str,
        /// Identifier or name that was looked up
        id: String,
    },

    /// The supplied promotional code was not accepted at checkout.
    #[error("Invalid promo code")]
    InvalidPromoCode,

    /// The operation is not allowed for the current user.
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Why access was refused
        message: String,
    },

    /// The operation conflicts with current state (e.g. checking out an empty cart).
    #[error("Conflict: {message}")]
    Conflict {
        /// What conflicted
        message: String,
    },

    /// I/O error (album art files, secret files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Vinyl operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a not-found error for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Error::Forbidden {
            message: message.into(),
        }
    }

    /// Creates a conflict error.
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Error::Conflict {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Whether this error was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Validation(_)
            | Error::NotFound { .. }
            | Error::InvalidPromoCode
            | Error::Forbidden { .. }
            | Error::Conflict { .. } => true,
            Error::Io(_) | Error::Serialization(_) | Error::Config { .. } => false,
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("album", 42);
        assert_eq!(err.to_string(), "album not found: 42");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_invalid_promo_code_display() {
        assert_eq!(Error::InvalidPromoCode.to_string(), "Invalid promo code");
    }

    #[test]
    fn test_validation_from_errors() {
        let mut errors = ValidationErrors::default();
        errors.push("title", "An Album Title is required");
        let err: Error = errors.into();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("title: An Album Title is required"));
    }

    #[test]
    fn test_io_error_is_server_error() {
        let err: Error = std::io::Error::other("disk full").into();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("missing web root");
        assert_eq!(err.to_string(), "Configuration error: missing web root");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}

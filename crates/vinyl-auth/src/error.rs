//! Auth-specific error types.

/// Errors that can occur during authentication and authorization.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// No Authorization header or bearer token present.
    #[error("missing authentication token")]
    MissingToken,

    /// The bearer token is empty or not printable ASCII.
    #[error("invalid token format: {0}")]
    InvalidFormat(String),

    /// The token does not belong to any known user.
    #[error("unknown token")]
    UnknownToken,

    /// The user is authenticated but lacks the required role.
    #[error("user '{username}' lacks role '{role}'")]
    Forbidden {
        /// Who was refused
        username: String,
        /// Role that was required
        role: String,
    },

    /// The configured user list is unusable.
    #[error("invalid auth configuration: {0}")]
    InvalidConfig(String),
}

impl AuthError {
    /// Whether this error should result in a 401/403 (vs. a 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidFormat(_)
                | AuthError::UnknownToken
                | AuthError::Forbidden { .. }
        )
    }
}

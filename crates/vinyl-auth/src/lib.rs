//! Authentication primitives for Vinyl.
//!
//! Provides:
//! - [`AuthenticatedUser`]: Identity and roles extracted from a validated token
//! - [`TokenValidator`]: Trait for async token validation
//! - [`StaticTokenValidator`]: Validator over bearer tokens listed in configuration
//! - [`AuthLayer`] / [`AuthService`]: Tower middleware parameterised over `TokenValidator`
//! - [`AuthConfig`]: Configuration for the auth layer
//! - [`AuthError`]: Auth-specific error types

mod error;
mod middleware;
mod user;
mod validator;

pub use error::AuthError;
pub use middleware::{AuthLayer, AuthService};
pub use user::{user_from_parts, username_from_parts, AuthenticatedUser};
pub use validator::{StaticTokenValidator, UserEntry};

/// Configuration for the auth middleware.
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Whether authentication is enabled. When false, every request runs as
    /// [`AuthenticatedUser::developer`].
    pub enabled: bool,
    /// Role the user must hold. `None` admits any authenticated user.
    pub required_role: Option<String>,
}

impl AuthConfig {
    /// Same settings, requiring `role`.
    pub fn with_role(&self, role: impl Into<String>) -> Self {
        Self {
            enabled: self.enabled,
            required_role: Some(role.into()),
        }
    }
}

/// Trait for validating tokens and extracting user identity.
///
/// The middleware calls `validate()` with the bearer token and stores the
/// returned user in the request extensions.
pub trait TokenValidator: Send + Sync + 'static {
    /// Validate a token and return the authenticated user.
    fn validate(
        &self,
        token: &str,
        config: &AuthConfig,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>,
    >;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_role_keeps_enabled() {
        let base = AuthConfig {
            enabled: true,
            required_role: None,
        };
        let admin = base.with_role("Administrator");
        assert!(admin.enabled);
        assert_eq!(admin.required_role.as_deref(), Some("Administrator"));
        assert!(base.required_role.is_none());
    }
}

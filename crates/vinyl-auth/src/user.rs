//! Authenticated user identity and extraction helpers.

use serde::Serialize;
use vinyl_core::ADMIN_ROLE;

/// An authenticated user identity, extracted from a validated token.
///
/// Stored in HTTP request extensions by the auth middleware, where handlers
/// pick it up with `Extension<AuthenticatedUser>` or [`user_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// Login name; also the user's cart id once signed in.
    pub username: String,
    /// Stable subject identifier.
    pub subject: String,
    /// Granted roles.
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// The user every request runs as when authentication is disabled.
    pub fn developer() -> Self {
        Self {
            username: "developer".to_string(),
            subject: "dev".to_string(),
            roles: vec![ADMIN_ROLE.to_string()],
        }
    }

    /// Whether the user holds `role` (exact match).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the user may administer the catalog.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

/// Extract the `AuthenticatedUser` from HTTP request `Parts`, if present.
pub fn user_from_parts(parts: &http::request::Parts) -> Option<&AuthenticatedUser> {
    parts.extensions.get::<AuthenticatedUser>()
}

/// Extract the username from HTTP request `Parts`.
///
/// Returns `"anonymous"` if no authenticated user is present.
pub fn username_from_parts(parts: &http::request::Parts) -> &str {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .map(|u| u.username.as_str())
        .unwrap_or("anonymous")
}

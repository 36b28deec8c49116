//! Bearer tokens listed in configuration.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{AuthConfig, AuthError, AuthenticatedUser, TokenValidator};

/// One configured user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    /// Login name.
    pub username: String,
    /// Bearer token, or a `secret:<name>` reference before resolution.
    pub token: String,
    /// Granted roles.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl std::fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Validates bearer tokens against a fixed user list.
///
/// Only BLAKE3 digests of the tokens are kept.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    users: HashMap<[u8; 32], AuthenticatedUser>,
}

impl StaticTokenValidator {
    /// Build from configured users.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when a username or token is empty, or a username or
    /// token appears twice.
    pub fn new(entries: impl IntoIterator<Item = UserEntry>) -> Result<Self, AuthError> {
        let mut users = HashMap::new();
        let mut names = std::collections::HashSet::new();
        for entry in entries {
            if entry.username.trim().is_empty() {
                return Err(AuthError::InvalidConfig("empty username".to_string()));
            }
            if entry.token.is_empty() {
                return Err(AuthError::InvalidConfig(format!(
                    "empty token for user '{}'",
                    entry.username
                )));
            }
            if !names.insert(entry.username.clone()) {
                return Err(AuthError::InvalidConfig(format!(
                    "duplicate user '{}'",
                    entry.username
                )));
            }
            let user = AuthenticatedUser {
                subject: format!("static:{}", entry.username),
                username: entry.username,
                roles: entry.roles,
            };
            if users.insert(digest(&entry.token), user).is_some() {
                return Err(AuthError::InvalidConfig(
                    "two users share a token".to_string(),
                ));
            }
        }
        log::debug!("Static token validator loaded {} user(s)", users.len());
        Ok(Self { users })
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are configured.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn lookup(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AuthError::InvalidFormat(
                "token must be non-empty printable ASCII".to_string(),
            ));
        }
        self.users
            .get(&digest(token))
            .cloned()
            .ok_or(AuthError::UnknownToken)
    }
}

fn digest(token: &str) -> [u8; 32] {
    *blake3::hash(token.as_bytes()).as_bytes()
}

impl TokenValidator for StaticTokenValidator {
    fn validate(
        &self,
        token: &str,
        _config: &AuthConfig,
    ) -> Pin<Box<dyn Future<Output = Result<AuthenticatedUser, AuthError>> + Send + '_>> {
        let result = self.lookup(token);
        Box::pin(async move { result })
    }
}

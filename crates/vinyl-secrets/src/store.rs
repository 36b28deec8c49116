//! The secret store trait, name rules, and config references.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::env::EnvSecretStore;
use crate::error::{Result, SecretError};
use crate::file::FileSecretStore;
use crate::memory::MemorySecretStore;

/// Longest accepted secret name.
pub const MAX_SECRET_NAME_LEN: usize = 127;

const SECRET_PREFIX: &str = "secret:";

/// A backend that holds named secrets.
///
/// Names follow [`validate_secret_name`]; every method rejects other names
/// with [`SecretError::InvalidName`] before touching the backend.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Value of secret `name`.
    async fn get_secret(&self, name: &str) -> Result<String>;

    /// Create or overwrite secret `name`.
    async fn set_secret(&self, name: &str, value: &str) -> Result<()>;

    /// Delete secret `name`.
    async fn delete_secret(&self, name: &str) -> Result<()>;

    /// Names of every stored secret, sorted.
    async fn list_secrets(&self) -> Result<Vec<String>>;

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Check a secret name: 1 to 127 characters of ASCII letters, digits and `-`.
pub fn validate_secret_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.len() > MAX_SECRET_NAME_LEN {
        "name is longer than 127 characters"
    } else if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        "only ASCII letters, digits and '-' are allowed"
    } else {
        return Ok(());
    };
    Err(SecretError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

/// A configuration value that is either a literal or a `secret:<name>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretRef {
    /// Used as written.
    Literal(String),
    /// Looked up in a [`SecretStore`].
    Named(String),
}

impl SecretRef {
    /// Classify a raw configuration value.
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(SECRET_PREFIX) {
            Some(name) => SecretRef::Named(name.trim().to_string()),
            None => SecretRef::Literal(raw.to_string()),
        }
    }

    /// Whether this value must be looked up.
    pub fn is_reference(&self) -> bool {
        matches!(self, SecretRef::Named(_))
    }

    /// The literal value, or the named secret from `store`.
    pub async fn resolve(&self, store: &dyn SecretStore) -> Result<String> {
        match self {
            SecretRef::Literal(value) => Ok(value.clone()),
            SecretRef::Named(name) => {
                tracing::debug!(secret = %name, backend = store.name(), "Resolving secret");
                store.get_secret(name).await
            }
        }
    }
}

/// Which backend to build, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum SecretBackend {
    /// [`MemorySecretStore`].
    Memory,
    /// [`EnvSecretStore`] with an optional variable prefix.
    Env {
        /// Variable prefix; defaults to `VINYL_SECRET_`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prefix: Option<String>,
    },
    /// [`FileSecretStore`] rooted at `dir`.
    File {
        /// Directory holding one file per secret.
        dir: PathBuf,
    },
}

impl Default for SecretBackend {
    fn default() -> Self {
        SecretBackend::Env { prefix: None }
    }
}

/// Build the configured backend.
pub fn create_secret_store(backend: &SecretBackend) -> Arc<dyn SecretStore> {
    let store: Arc<dyn SecretStore> = match backend {
        SecretBackend::Memory => Arc::new(MemorySecretStore::new()),
        SecretBackend::Env { prefix: None } => Arc::new(EnvSecretStore::new()),
        SecretBackend::Env {
            prefix: Some(prefix),
        } => Arc::new(EnvSecretStore::with_prefix(prefix.clone())),
        SecretBackend::File { dir } => Arc::new(FileSecretStore::new(dir.clone())),
    };
    tracing::debug!(backend = store.name(), "Secret store ready");
    store
}

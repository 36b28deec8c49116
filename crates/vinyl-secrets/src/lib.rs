//! # vinyl-secrets
//!
//! Pluggable secret resolution for Vinyl.
//!
//! Configuration values that should not live in plain text (bearer tokens,
//! connection strings) are written as `secret:<name>` and resolved at startup
//! through a [`SecretStore`]:
//!
//! - [`MemorySecretStore`]: process-local map, for tests and development
//! - [`EnvSecretStore`]: read-only, `db-password` → `VINYL_SECRET_DB_PASSWORD`
//! - [`FileSecretStore`]: one file per secret in a directory
//!
//! ```rust,ignore
//! use vinyl_secrets::{SecretRef, MemorySecretStore, SecretStore};
//!
//! let store = MemorySecretStore::new();
//! store.set_secret("admin-token", "s3cret").await?;
//! let token = SecretRef::parse("secret:admin-token").resolve(&store).await?;
//! ```

#![forbid(unsafe_code)]

mod env;
mod error;
mod file;
mod memory;
mod store;

pub use env::{EnvSecretStore, DEFAULT_ENV_PREFIX};
pub use error::{Result, SecretError};
pub use file::FileSecretStore;
pub use memory::MemorySecretStore;
pub use store::{
    create_secret_store, validate_secret_name, SecretBackend, SecretRef, SecretStore,
    MAX_SECRET_NAME_LEN,
};

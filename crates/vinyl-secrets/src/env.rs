//! Read-only secrets from environment variables.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{Result, SecretError};
use crate::store::{validate_secret_name, SecretStore};

/// Prefix used when none is configured.
pub const DEFAULT_ENV_PREFIX: &str = "VINYL_SECRET_";

#[derive(Debug, Clone)]
enum Source {
    Process,
    Fixed(BTreeMap<String, String>),
}

/// Secrets read from environment variables.
///
/// Secret `db-password` maps to `VINYL_SECRET_DB_PASSWORD`: the name is
/// upper-cased, `-` becomes `_`, and the prefix is prepended.
#[derive(Debug, Clone)]
pub struct EnvSecretStore {
    prefix: String,
    source: Source,
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvSecretStore {
    /// Read the process environment with [`DEFAULT_ENV_PREFIX`].
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Read the process environment with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            source: Source::Process,
        }
    }

    /// Read from a fixed set of variables instead of the process environment.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            source: Source::Fixed(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Variable that holds secret `name`.
    pub fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name.to_ascii_uppercase().replace('-', "_"))
    }

    fn lookup(&self, var: &str) -> Option<String> {
        match &self.source {
            Source::Process => std::env::var(var).ok(),
            Source::Fixed(vars) => vars.get(var).cloned(),
        }
    }

    fn vars(&self) -> Vec<(String, String)> {
        match &self.source {
            Source::Process => std::env::vars().collect(),
            Source::Fixed(vars) => vars.clone().into_iter().collect(),
        }
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String> {
        validate_secret_name(name)?;
        self.lookup(&self.var_name(name))
            .ok_or_else(|| SecretError::not_found(name))
    }

    async fn set_secret(&self, _name: &str, _value: &str) -> Result<()> {
        Err(SecretError::ReadOnly { backend: "env" })
    }

    async fn delete_secret(&self, _name: &str) -> Result<()> {
        Err(SecretError::ReadOnly { backend: "env" })
    }

    async fn list_secrets(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .vars()
            .into_iter()
            .filter_map(|(var, _)| {
                let rest = var.strip_prefix(&self.prefix)?;
                let name = rest.to_ascii_lowercase().replace('_', "-");
                validate_secret_name(&name).ok().map(|()| name)
            })
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

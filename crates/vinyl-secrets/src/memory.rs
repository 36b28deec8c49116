//! In-process secret store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, SecretError};
use crate::store::{validate_secret_name, SecretStore};

/// Secrets held in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<BTreeMap<String, String>>,
}

impl MemorySecretStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut secrets = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.into();
            validate_secret_name(&name)?;
            secrets.insert(name, value.into());
        }
        Ok(Self {
            secrets: RwLock::new(secrets),
        })
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn get_secret(&self, name: &str) -> Result<String> {
        validate_secret_name(name)?;
        self.secrets
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| SecretError::not_found(name))
    }

    async fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        validate_secret_name(name)?;
        self.secrets
            .write()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> Result<()> {
        validate_secret_name(name)?;
        self.secrets
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| SecretError::not_found(name))
    }

    async fn list_secrets(&self) -> Result<Vec<String>> {
        Ok(self.secrets.read().await.keys().cloned().collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemorySecretStore::new();
        store.set_secret("api-key", "one").await.unwrap();
        store.set_secret("api-key", "two").await.unwrap();
        assert_eq!(store.get_secret("api-key").await.unwrap(), "two");

        store.delete_secret("api-key").await.unwrap();
        assert!(matches!(
            store.get_secret("api-key").await,
            Err(SecretError::NotFound { .. })
        ));
        assert!(store.delete_secret("api-key").await.is_err());
    }

    #[tokio::test]
    async fn test_list_is_sorted() {
        let store = MemorySecretStore::from_pairs([("b", "2"), ("a", "1"), ("c", "3")]).unwrap();
        assert_eq!(store.list_secrets().await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_rejects_invalid_names() {
        let store = MemorySecretStore::new();
        assert!(matches!(
            store.set_secret("bad name", "x").await,
            Err(SecretError::InvalidName { .. })
        ));
        assert!(MemorySecretStore::from_pairs([("no/slash", "x")]).is_err());
    }
}

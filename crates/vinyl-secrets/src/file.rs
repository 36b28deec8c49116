//! Secrets stored as files in a directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Result, SecretError};
use crate::store::{validate_secret_name, SecretStore};

/// One file per secret under a directory; the file name is the secret name.
///
/// Trailing newlines are stripped on read so values written by `echo` work.
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    /// A store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory secrets are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> Result<PathBuf> {
        validate_secret_name(name)?;
        Ok(self.dir.join(name))
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String> {
        let path = self.path_of(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(value.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SecretError::not_found(name))
            }
            Err(e) => Err(SecretError::io(e, path)),
        }
    }

    async fn set_secret(&self, name: &str, value: &str) -> Result<()> {
        let path = self.path_of(name)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| SecretError::io(e, &self.dir))?;
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| SecretError::io(e, &path))?;
        tracing::info!(secret = %name, dir = %self.dir.display(), "Stored secret");
        Ok(())
    }

    async fn delete_secret(&self, name: &str) -> Result<()> {
        let path = self.path_of(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SecretError::not_found(name))
            }
            Err(e) => Err(SecretError::io(e, path)),
        }
    }

    async fn list_secrets(&self) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SecretError::io(e, &self.dir)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SecretError::io(e, &self.dir))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if validate_secret_name(name).is_ok() {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

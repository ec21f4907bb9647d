//! File-based token storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

/// File name used inside the data directory.
pub const TOKEN_FILE_NAME: &str = "tokens.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct TokenFile {
    #[serde(default)]
    tokens: BTreeMap<String, String>,
}

/// Stores one token per API origin in a TOML file.
///
/// Writes go through a temporary file and a rename, so a crash never leaves
/// a half-written file behind.
pub struct FileTokenStorage {
    path: PathBuf,
    origin: String,
    lock: Mutex<()>,
}

impl FileTokenStorage {
    /// Creates storage backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, origin: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            origin: origin.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates storage at the default file name inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path, origin: impl Into<String>) -> Self {
        Self::new(dir.join(TOKEN_FILE_NAME), origin)
    }

    /// Returns the token file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<TokenFile, StorageError> {
        if !self.path.exists() {
            return Ok(TokenFile::default());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::RetrievalFailed(e.to_string()))?;

        match toml::from_str(&content) {
            Ok(file) => Ok(file),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Token file is corrupt, ignoring it");
                Ok(TokenFile::default())
            }
        }
    }

    fn write(&self, file: &TokenFile) -> Result<(), StorageError> {
        let content =
            toml::to_string_pretty(file).map_err(|e| StorageError::StorageFailed(e.to_string()))?;

        let parent = self
            .path
            .parent()
            .ok_or_else(|| StorageError::NotAvailable("invalid token file path".into()))?;
        fs::create_dir_all(parent).map_err(|e| StorageError::AccessFailed(e.to_string()))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| StorageError::StorageFailed(e.error.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        let _guard = self.lock.lock();
        let file = self.read()?;
        debug!(origin = %self.origin, "Read token file");
        Ok(file.tokens.get(&self.origin).and_then(AuthToken::new))
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut file = self.read()?;
        file.tokens
            .insert(self.origin.clone(), token.as_str().to_string());
        self.write(&file)?;
        debug!(origin = %self.origin, "Token stored in file");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock();
        let mut file = self.read()?;
        if file.tokens.remove(&self.origin).is_none() {
            debug!("No token to delete");
            return Ok(());
        }
        self.write(&file)
            .map_err(|e| StorageError::DeletionFailed(e.to_string()))?;
        debug!(origin = %self.origin, "Token deleted from file");
        Ok(())
    }
}

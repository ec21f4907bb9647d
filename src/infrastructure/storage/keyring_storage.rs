//! Keyring-based token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "codeassist";

/// System keyring token storage adapter.
///
/// One entry per API origin, so tokens for different servers never mix.
pub struct KeyringTokenStorage {
    service: String,
    origin: String,
}

impl KeyringTokenStorage {
    /// Creates storage scoped to `origin`.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self::with_names(KEYRING_SERVICE, origin)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            origin: origin.into(),
        }
    }

    fn entry(&self) -> Result<Entry, StorageError> {
        Entry::new(&self.service, &self.origin)
            .map_err(|e| StorageError::AccessFailed(format!("failed to access keyring: {e}")))
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        debug!(service = %self.service, origin = %self.origin, "Retrieving token from keyring");

        let entry = self.entry()?;

        match entry.get_password() {
            Ok(password) => {
                debug!("Token found in keyring");
                Ok(AuthToken::new(password))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No token stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve token from keyring");
                Err(StorageError::RetrievalFailed(e.to_string()))
            }
        }
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(service = %self.service, origin = %self.origin, "Storing token in keyring");

        let entry = self.entry()?;

        entry.set_password(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to store token in keyring");
            StorageError::StorageFailed(e.to_string())
        })?;

        debug!("Token stored successfully");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        debug!(service = %self.service, origin = %self.origin, "Deleting token from keyring");

        let entry = self.entry()?;

        match entry.delete_credential() {
            Ok(()) => {
                debug!("Token deleted from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No token to delete");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete token from keyring");
                Err(StorageError::DeletionFailed(e.to_string()))
            }
        }
    }
}

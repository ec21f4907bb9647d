//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;

/// Port for token persistence operations.
///
/// Holds at most one token; storing replaces the previous one.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError>;

    /// Stores token durably.
    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError>;

    /// Deletes stored token. Deleting an absent token succeeds.
    async fn delete_token(&self) -> Result<(), StorageError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, StorageError> {
        Ok(self.get_token().await?.is_some())
    }
}

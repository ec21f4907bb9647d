//! Token persistence error types.

use thiserror::Error;

/// Token storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be opened.
    #[error("failed to access token storage: {0}")]
    AccessFailed(String),

    /// Reading failed.
    #[error("failed to retrieve token: {0}")]
    RetrievalFailed(String),

    /// Writing failed.
    #[error("failed to store token: {0}")]
    StorageFailed(String),

    /// Deleting failed.
    #[error("failed to delete token: {0}")]
    DeletionFailed(String),

    /// Backend is missing on this system.
    #[error("token storage not available: {0}")]
    NotAvailable(String),
}

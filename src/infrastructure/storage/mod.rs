//! Token storage adapters.

mod file_storage;
#[cfg(feature = "keyring")]
mod keyring_storage;

pub use file_storage::{FileTokenStorage, TOKEN_FILE_NAME};
#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringTokenStorage;

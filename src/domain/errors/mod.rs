//! Domain error types.

mod api_error;
mod storage_error;
mod transport_error;

pub use api_error::{ApiError, SESSION_EXPIRED_MESSAGE};
pub use storage_error::StorageError;
pub use transport_error::TransportError;

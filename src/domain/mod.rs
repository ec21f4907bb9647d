//! Domain layer with core entities, the operation table and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notification lifecycle.
pub mod notification;
/// Remote operation table.
pub mod operation;
/// Port definitions.
pub mod ports;

pub use entities::{ApiRequest, ApiResponse, AuthToken, HttpMethod, UserProfile};
pub use errors::{ApiError, StorageError, TransportError};
pub use notification::{
    DismissReason, Notification, Severity, ToastEvent, ToastPhase, ToastTiming,
};
pub use operation::Operation;
pub use ports::{Clock, HttpTransport, LOGIN_ROUTE, NavigatorPort, TokenStoragePort};

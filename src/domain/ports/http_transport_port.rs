//! HTTP transport port definition.

use async_trait::async_trait;

use crate::domain::entities::{ApiRequest, ApiResponse};
use crate::domain::errors::TransportError;

/// Port for sending requests to the service.
///
/// Any received response, whatever its status, is `Ok`. `Err` means no
/// response arrived.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends the request as-is.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

//! Request and response interceptors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::domain::entities::{AUTHORIZATION, ApiRequest, ApiResponse};
use crate::domain::errors::{ApiError, TransportError};
use crate::domain::operation::Operation;
use crate::domain::ports::{LOGIN_ROUTE, NavigatorPort, TokenStoragePort};

/// Stage applied to every request before it is sent. Cannot fail.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Returns the request to send.
    async fn on_request(&self, request: ApiRequest) -> ApiRequest;
}

/// What the pipeline should do after a response interceptor ran.
#[derive(Debug)]
pub enum ResponseDisposition {
    /// Let the next stage, and finally the caller, see the outcome.
    Continue,
    /// Stop here and fail the call with this error.
    Abort(ApiError),
}

/// Stage applied to every outcome, successful or not.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Decides whether the caller sees the result.
    async fn on_response(
        &self,
        operation: Operation,
        outcome: &Result<ApiResponse, TransportError>,
    ) -> ResponseDisposition;
}

/// Injects the stored token as a bearer credential.
///
/// Requests made without a token carry no `Authorization` header at all,
/// even one set by the caller.
pub struct AuthHeaderInterceptor {
    storage: Arc<dyn TokenStoragePort>,
}

impl AuthHeaderInterceptor {
    /// Creates interceptor reading from `storage`.
    #[must_use]
    pub const fn new(storage: Arc<dyn TokenStoragePort>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestInterceptor for AuthHeaderInterceptor {
    async fn on_request(&self, request: ApiRequest) -> ApiRequest {
        match self.storage.get_token().await {
            Ok(Some(token)) => request.with_bearer(&token),
            Ok(None) => request.without_header(AUTHORIZATION),
            Err(e) => {
                warn!(error = %e, "Token unreadable, sending request unauthenticated");
                request.without_header(AUTHORIZATION)
            }
        }
    }
}

/// Tears the session down when the service answers 401.
///
/// The token is cleared and the login redirect issued before the caller
/// gets its error back.
pub struct SessionGuard {
    storage: Arc<dyn TokenStoragePort>,
    navigator: Arc<dyn NavigatorPort>,
}

impl SessionGuard {
    /// Creates guard that clears `storage` and redirects through `navigator`.
    #[must_use]
    pub const fn new(storage: Arc<dyn TokenStoragePort>, navigator: Arc<dyn NavigatorPort>) -> Self {
        Self { storage, navigator }
    }
}

#[async_trait]
impl ResponseInterceptor for SessionGuard {
    async fn on_response(
        &self,
        operation: Operation,
        outcome: &Result<ApiResponse, TransportError>,
    ) -> ResponseDisposition {
        let Ok(response) = outcome else {
            return ResponseDisposition::Continue;
        };
        if !response.is_unauthorized() {
            return ResponseDisposition::Continue;
        }

        warn!(%operation, "Session rejected by service, signing out");

        if let Err(e) = self.storage.delete_token().await {
            error!(error = %e, "Failed to clear stored token");
        }
        self.navigator.redirect(LOGIN_ROUTE);
        debug!(route = LOGIN_ROUTE, "Redirect issued");

        ResponseDisposition::Abort(ApiError::session_expired(response.error_message()))
    }
}

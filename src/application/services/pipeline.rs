//! Interceptor pipeline around the transport.

use std::sync::Arc;

use tracing::{debug, warn};

use super::interceptors::{
    AuthHeaderInterceptor, RequestInterceptor, ResponseDisposition, ResponseInterceptor,
    SessionGuard,
};
use crate::domain::entities::{ApiRequest, ApiResponse};
use crate::domain::errors::ApiError;
use crate::domain::operation::Operation;
use crate::domain::ports::{HttpTransport, NavigatorPort, TokenStoragePort};

/// Sends requests through the interceptor chain and classifies the outcome.
#[derive(Clone)]
pub struct ApiPipeline {
    transport: Arc<dyn HttpTransport>,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiPipeline {
    /// Creates a pipeline with no interceptors.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Creates the standard authenticated pipeline.
    #[must_use]
    pub fn authenticated(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn TokenStoragePort>,
        navigator: Arc<dyn NavigatorPort>,
    ) -> Self {
        Self::new(transport)
            .with_request_interceptor(Arc::new(AuthHeaderInterceptor::new(Arc::clone(&storage))))
            .with_response_interceptor(Arc::new(SessionGuard::new(storage, navigator)))
    }

    /// Appends a request interceptor.
    #[must_use]
    pub fn with_request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    /// Appends a response interceptor.
    #[must_use]
    pub fn with_response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    /// Executes one call. Yields a success response or a classified error.
    ///
    /// # Errors
    /// Returns error on non-success status, network failure, or an
    /// interceptor abort.
    pub async fn execute(
        &self,
        operation: Operation,
        mut request: ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        for interceptor in &self.request_interceptors {
            request = interceptor.on_request(request).await;
        }

        debug!(%operation, method = %request.method(), path = request.path(), "Sending request");
        let outcome = self.transport.send(&request).await;

        for interceptor in &self.response_interceptors {
            if let ResponseDisposition::Abort(error) =
                interceptor.on_response(operation, &outcome).await
            {
                return Err(error);
            }
        }

        match outcome {
            Ok(response) if response.is_success() => {
                debug!(%operation, status = response.status(), "Request succeeded");
                Ok(response)
            }
            Ok(response) => {
                let error = ApiError::from_response(operation, &response);
                warn!(%operation, status = response.status(), reason = error.message(), "Request failed");
                Err(error)
            }
            Err(source) => {
                warn!(%operation, error = %source, "No response from service");
                Err(ApiError::transport(operation, source))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AUTHORIZATION, AuthToken, HttpMethod};
    use crate::domain::errors::TransportError;
    use crate::domain::ports::LOGIN_ROUTE;
    use crate::domain::ports::mocks::{MockNavigator, MockTokenStorage, MockTransport};
    use serde_json::json;

    struct Fixture {
        transport: Arc<MockTransport>,
        storage: Arc<MockTokenStorage>,
        navigator: Arc<MockNavigator>,
        pipeline: ApiPipeline,
    }

    fn fixture(transport: MockTransport, storage: MockTokenStorage) -> Fixture {
        let transport = Arc::new(transport);
        let storage = Arc::new(storage);
        let navigator = Arc::new(MockNavigator::new());
        let pipeline = ApiPipeline::authenticated(
            transport.clone(),
            storage.clone(),
            navigator.clone(),
        );
        Fixture {
            transport,
            storage,
            navigator,
            pipeline,
        }
    }

    fn profile_request() -> ApiRequest {
        ApiRequest::new(HttpMethod::Get, "/auth/profile")
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let f = fixture(
            MockTransport::new().respond(200, json!({ "ok": true })),
            MockTokenStorage::with_token(AuthToken::new_unchecked("abc")),
        );

        let response = f
            .pipeline
            .execute(Operation::GetProfile, profile_request())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let sent = f.transport.last_sent().unwrap();
        assert_eq!(sent.header(AUTHORIZATION), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_401_aborts_before_classification() {
        let f = fixture(
            MockTransport::new().respond(401, json!({})),
            MockTokenStorage::with_token(AuthToken::new_unchecked("abc")),
        );

        let error = f
            .pipeline
            .execute(Operation::GetProfile, profile_request())
            .await
            .unwrap_err();

        assert!(error.is_session_expired());
        assert!(!f.storage.has_token().await.unwrap());
        assert_eq!(f.navigator.redirects(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback() {
        let f = fixture(
            MockTransport::new().fail(TransportError::Timeout),
            MockTokenStorage::new(),
        );

        let error = f
            .pipeline
            .execute(Operation::GetProfile, profile_request())
            .await
            .unwrap_err();

        assert_eq!(error.message(), "Failed to load profile");
        assert!(f.navigator.redirects().is_empty());
    }

    #[tokio::test]
    async fn test_bare_pipeline_sends_request_unchanged() {
        let transport = Arc::new(MockTransport::new().respond(204, json!(null)));
        let pipeline = ApiPipeline::new(transport.clone());
        let request = profile_request().with_header("x-trace", "1");

        pipeline
            .execute(Operation::GetProfile, request.clone())
            .await
            .unwrap();

        assert_eq!(transport.sent(), vec![request]);
    }
}

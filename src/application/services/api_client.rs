//! Typed façade over the service API.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use super::pipeline::ApiPipeline;
use crate::application::dto::{
    AuthPayload, CodeExplanation, DebugCodeRequest, DebugReport, ExplainCodeRequest,
    GenerateCodeRequest, GenerateSqlRequest, GeneratedCode, LoginRequest, LoginResponse,
    ProfileUpdate, RegisterRequest,
};
use crate::domain::entities::{ApiRequest, AuthToken, UserProfile};
use crate::domain::errors::{ApiError, StorageError};
use crate::domain::operation::Operation;
use crate::domain::ports::{HttpTransport, NavigatorPort, TokenStoragePort};

/// One method per remote capability.
///
/// Inputs are forwarded exactly as given. Failures carry a message ready to
/// show the user; a 401 has already signed the user out by the time the
/// error is returned.
#[derive(Clone)]
pub struct CodeAssistClient {
    pipeline: ApiPipeline,
    storage: Arc<dyn TokenStoragePort>,
}

impl CodeAssistClient {
    /// Creates client over the standard authenticated pipeline.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn TokenStoragePort>,
        navigator: Arc<dyn NavigatorPort>,
    ) -> Self {
        let pipeline = ApiPipeline::authenticated(transport, Arc::clone(&storage), navigator);
        Self::with_pipeline(pipeline, storage)
    }

    /// Creates client over a custom pipeline.
    #[must_use]
    pub const fn with_pipeline(pipeline: ApiPipeline, storage: Arc<dyn TokenStoragePort>) -> Self {
        Self { pipeline, storage }
    }

    /// Signs in and persists the issued token.
    ///
    /// # Errors
    /// Returns error if the service rejects the credentials or is unreachable.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let payload: AuthPayload = self.call(Operation::Login, Some(credentials)).await?;
        self.start_session(Operation::Login, payload).await
    }

    /// Creates an account and signs in.
    ///
    /// # Errors
    /// Returns error if registration is refused or the service is unreachable.
    pub async fn register(&self, details: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        let payload: AuthPayload = self.call(Operation::Register, Some(details)).await?;
        self.start_session(Operation::Register, payload).await
    }

    /// Fetches the signed-in profile.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.call::<(), _>(Operation::GetProfile, None).await
    }

    /// Updates the signed-in profile.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.call(Operation::UpdateProfile, Some(update)).await
    }

    /// Generates code from a natural-language prompt.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn generate_code(
        &self,
        prompt: &str,
        language: &str,
        include_comments: bool,
    ) -> Result<GeneratedCode, ApiError> {
        let body = GenerateCodeRequest {
            prompt: prompt.to_string(),
            language: language.to_string(),
            include_comments,
        };
        self.call(Operation::GenerateCode, Some(&body)).await
    }

    /// Generates a SQL query for the given database engine.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn generate_sql(
        &self,
        prompt: &str,
        database_type: &str,
    ) -> Result<GeneratedCode, ApiError> {
        let body = GenerateSqlRequest {
            prompt: prompt.to_string(),
            database_type: database_type.to_string(),
        };
        self.call(Operation::GenerateSql, Some(&body)).await
    }

    /// Diagnoses broken code, optionally with the error it produced.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn debug_code(
        &self,
        code: &str,
        language: &str,
        error_message: Option<&str>,
    ) -> Result<DebugReport, ApiError> {
        let body = DebugCodeRequest {
            code: code.to_string(),
            language: language.to_string(),
            error_message: error_message.map(str::to_string),
        };
        self.call(Operation::DebugCode, Some(&body)).await
    }

    /// Explains what a piece of code does.
    ///
    /// # Errors
    /// Returns error if the call fails.
    pub async fn explain_code(
        &self,
        code: &str,
        language: &str,
    ) -> Result<CodeExplanation, ApiError> {
        let body = ExplainCodeRequest {
            code: code.to_string(),
            language: language.to_string(),
        };
        self.call(Operation::ExplainCode, Some(&body)).await
    }

    /// Forgets the stored token. Does not contact the service.
    ///
    /// # Errors
    /// Returns error if the token store cannot be cleared.
    pub async fn logout(&self) -> Result<(), StorageError> {
        debug!("Deleting stored token");
        match self.storage.delete_token().await {
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to delete stored token");
                Err(e)
            }
        }
    }

    /// Returns whether a token is currently stored.
    pub async fn is_signed_in(&self) -> bool {
        matches!(self.storage.has_token().await, Ok(true))
    }

    async fn call<B, T>(&self, operation: Operation, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = ApiRequest::new(operation.method(), operation.path());
        if let Some(body) = body {
            let value = serde_json::to_value(body).map_err(|e| {
                warn!(%operation, error = %e, "Failed to encode request body");
                ApiError::invalid_response(operation, Some(e))
            })?;
            request = request.with_body(value);
        }

        let response = self.pipeline.execute(operation, request).await?;

        response.json().map_err(|e| {
            warn!(%operation, error = %e, "Failed to decode response body");
            ApiError::invalid_response(operation, Some(e))
        })
    }

    async fn start_session(
        &self,
        operation: Operation,
        payload: AuthPayload,
    ) -> Result<LoginResponse, ApiError> {
        let token = AuthToken::new(payload.token).ok_or_else(|| {
            warn!(%operation, "Service returned an empty token");
            ApiError::invalid_response(operation, None)
        })?;

        info!(user_id = payload.user.id(), "Successfully authenticated");

        let token_persisted = match self.storage.store_token(&token).await {
            Ok(()) => {
                info!("Token persisted");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to persist token");
                false
            }
        };

        Ok(LoginResponse::new(payload.user, token_persisted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AUTHORIZATION, HttpMethod};
    use crate::domain::errors::TransportError;
    use crate::domain::ports::LOGIN_ROUTE;
    use crate::domain::ports::mocks::{MockNavigator, MockTokenStorage, MockTransport};
    use serde_json::json;
    use test_case::test_case;

    struct Harness {
        transport: Arc<MockTransport>,
        storage: Arc<MockTokenStorage>,
        navigator: Arc<MockNavigator>,
        client: CodeAssistClient,
    }

    fn harness(transport: MockTransport, storage: MockTokenStorage) -> Harness {
        let transport = Arc::new(transport);
        let storage = Arc::new(storage);
        let navigator = Arc::new(MockNavigator::new());
        let client = CodeAssistClient::new(transport.clone(), storage.clone(), navigator.clone());
        Harness {
            transport,
            storage,
            navigator,
            client,
        }
    }

    fn signed_in() -> MockTokenStorage {
        MockTokenStorage::with_token(AuthToken::new_unchecked("session-token"))
    }

    async fn call_any(client: &CodeAssistClient, operation: Operation) -> Result<(), ApiError> {
        match operation {
            Operation::Login => client
                .login(&LoginRequest::new("a@b.c", "pw"))
                .await
                .map(drop),
            Operation::Register => client
                .register(&RegisterRequest::new("A", "a@b.c", "pw"))
                .await
                .map(drop),
            Operation::GetProfile => client.get_profile().await.map(drop),
            Operation::UpdateProfile => client
                .update_profile(&ProfileUpdate::default())
                .await
                .map(drop),
            Operation::GenerateCode => client.generate_code("p", "rust", true).await.map(drop),
            Operation::GenerateSql => client.generate_sql("p", "postgres").await.map(drop),
            Operation::DebugCode => client.debug_code("c", "go", None).await.map(drop),
            Operation::ExplainCode => client.explain_code("c", "go").await.map(drop),
        }
    }

    #[tokio::test]
    async fn test_generate_code_scenario() {
        let h = harness(
            MockTransport::new().respond(200, json!({ "code": "def f(xs): ..." })),
            signed_in(),
        );

        let generated = h
            .client
            .generate_code("sum of evens", "python", true)
            .await
            .unwrap();

        assert_eq!(generated.code, "def f(xs): ...");
        assert!(h.navigator.redirects().is_empty());

        let sent = h.transport.last_sent().unwrap();
        assert_eq!(sent.method(), HttpMethod::Post);
        assert_eq!(sent.path(), "/code/generate");
        assert_eq!(
            sent.body(),
            Some(&json!({ "prompt": "sum of evens", "language": "python", "includeComments": true }))
        );
        assert_eq!(sent.header(AUTHORIZATION), Some("Bearer session-token"));
    }

    #[tokio::test]
    async fn test_empty_inputs_forwarded_verbatim() {
        let h = harness(
            MockTransport::new().respond(200, json!({ "result": "ok" })),
            signed_in(),
        );

        h.client.debug_code("", "", Some("")).await.unwrap();

        let sent = h.transport.last_sent().unwrap();
        assert_eq!(
            sent.body(),
            Some(&json!({ "code": "", "language": "", "errorMessage": "" }))
        );
    }

    #[tokio::test]
    async fn test_debug_and_explain_payloads() {
        let h = harness(
            MockTransport::new()
                .respond(200, json!({ "result": "missing colon on line 1" }))
                .respond(200, json!({ "explanation": "prints hello" })),
            signed_in(),
        );

        let report = h
            .client
            .debug_code("def f()", "python", Some("SyntaxError"))
            .await
            .unwrap();
        let explanation = h.client.explain_code("print('hello')", "python").await.unwrap();

        assert_eq!(report.result, "missing colon on line 1");
        assert_eq!(explanation.explanation, "prints hello");

        let paths: Vec<_> = h.transport.sent().iter().map(|r| r.path().to_string()).collect();
        assert_eq!(paths, vec!["/debug/debug", "/debug/explain"]);
    }

    #[test_case(Operation::Login ; "login")]
    #[test_case(Operation::Register ; "register")]
    #[test_case(Operation::GetProfile ; "get_profile")]
    #[test_case(Operation::UpdateProfile ; "update_profile")]
    #[test_case(Operation::GenerateCode ; "generate_code")]
    #[test_case(Operation::GenerateSql ; "generate_sql")]
    #[test_case(Operation::DebugCode ; "debug_code")]
    #[test_case(Operation::ExplainCode ; "explain_code")]
    #[tokio::test]
    async fn test_401_signs_out_once(operation: Operation) {
        let h = harness(
            MockTransport::new().respond(401, json!({ "message": "Token is not valid" })),
            signed_in(),
        );

        let error = call_any(&h.client, operation).await.unwrap_err();

        assert!(error.is_session_expired());
        assert!(!h.storage.has_token().await.unwrap());
        assert_eq!(h.navigator.redirects(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[test_case(400 ; "bad_request")]
    #[test_case(403 ; "forbidden")]
    #[test_case(404 ; "not_found")]
    #[test_case(500 ; "server_error")]
    #[tokio::test]
    async fn test_remote_message_surfaced_verbatim(status: u16) {
        let h = harness(
            MockTransport::new().respond(status, json!({ "message": "X" })),
            signed_in(),
        );

        let error = h.client.explain_code("x", "js").await.unwrap_err();

        assert_eq!(error.to_string(), "X");
        assert!(h.storage.has_token().await.unwrap());
        assert!(h.navigator.redirects().is_empty());
    }

    #[test_case(Operation::GenerateCode, "Failed to generate code" ; "generate")]
    #[test_case(Operation::DebugCode, "Failed to debug code" ; "debug")]
    #[test_case(Operation::ExplainCode, "Failed to explain code" ; "explain")]
    #[tokio::test]
    async fn test_transport_failure_maps_to_fallback(operation: Operation, expected: &str) {
        let h = harness(
            MockTransport::new().fail(TransportError::Connect("connection refused".into())),
            signed_in(),
        );

        let error = call_any(&h.client, operation).await.unwrap_err();

        assert_eq!(error.to_string(), expected);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_uses_fallback() {
        let h = harness(
            MockTransport::new().respond(200, json!({ "unexpected": 1 })),
            signed_in(),
        );

        let error = h.client.generate_code("p", "rust", false).await.unwrap_err();

        assert_eq!(error.message(), "Failed to generate code");
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let h = harness(
            MockTransport::new().respond(
                200,
                json!({ "token": "fresh", "user": { "_id": "1", "name": "Ada", "email": "ada@example.com" } }),
            ),
            MockTokenStorage::new(),
        );

        let response = h
            .client
            .login(&LoginRequest::new("ada@example.com", "pw"))
            .await
            .unwrap();

        assert!(response.token_persisted);
        assert_eq!(response.user.name(), "Ada");
        assert_eq!(
            h.storage.get_token().await.unwrap().unwrap().as_str(),
            "fresh"
        );
        assert_eq!(h.transport.last_sent().unwrap().header(AUTHORIZATION), None);
    }

    #[tokio::test]
    async fn test_login_with_blank_token_fails() {
        let h = harness(
            MockTransport::new().respond(
                200,
                json!({ "token": " ", "user": { "id": "1", "email": "ada@example.com" } }),
            ),
            MockTokenStorage::new(),
        );

        let error = h
            .client
            .login(&LoginRequest::new("ada@example.com", "pw"))
            .await
            .unwrap_err();

        assert_eq!(error.message(), "Failed to log in");
        assert!(!h.client.is_signed_in().await);
    }

    #[tokio::test]
    async fn test_logout_clears_without_redirect() {
        let h = harness(MockTransport::new(), signed_in());

        h.client.logout().await.unwrap();

        assert!(!h.client.is_signed_in().await);
        assert!(h.navigator.redirects().is_empty());
        assert!(h.transport.sent().is_empty());
    }
}

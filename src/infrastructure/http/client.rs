//! Service HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, header};
use tracing::{debug, warn};

use crate::domain::entities::{ApiRequest, ApiResponse, HttpMethod};
use crate::domain::errors::TransportError;
use crate::domain::ports::HttpTransport;

/// Base URL used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

const USER_AGENT: &str = concat!("codeassist/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON transport bound to one base URL.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates transport with default base URL and timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_base_url(DEFAULT_API_BASE, DEFAULT_TIMEOUT)
    }

    /// Creates transport with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    const fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    fn classify(e: &reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(request.path());

        let mut builder = self.client.request(Self::method(request.method()), &url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, %url, "Failed to reach service");
            Self::classify(&e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, status, "Failed to read response body");
            Self::classify(&e)
        })?;

        debug!(status, bytes = body.len(), %url, "Response received");
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let transport = ReqwestTransport::new();
        assert!(transport.is_ok());
    }

    #[test]
    fn test_url_joining_tolerates_slashes() {
        let transport =
            ReqwestTransport::with_base_url("http://localhost:5000/api/", DEFAULT_TIMEOUT).unwrap();

        assert_eq!(transport.base_url(), "http://localhost:5000/api");
        assert_eq!(
            transport.url_for("/code/generate"),
            "http://localhost:5000/api/code/generate"
        );
        assert_eq!(
            transport.url_for("debug/explain"),
            "http://localhost:5000/api/debug/explain"
        );
    }
}

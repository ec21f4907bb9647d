//! Errors surfaced to callers of the API client.

use thiserror::Error;

use super::TransportError;
use crate::domain::entities::ApiResponse;
use crate::domain::operation::Operation;

/// Shown when the service rejects the session without an explanation.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Failure of a façade call.
///
/// `Display` always yields a message fit for the user; transport internals
/// are kept in the error source chain only.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// The service answered 401. The session has already been torn down.
    #[error("{message}")]
    SessionExpired { message: String },

    /// Any other non-2xx answer.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// No response was received.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: TransportError,
    },

    /// A 2xx answer whose body could not be decoded.
    #[error("{message}")]
    InvalidResponse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl ApiError {
    /// Creates session expired error.
    #[must_use]
    pub fn session_expired(message: Option<String>) -> Self {
        Self::SessionExpired {
            message: message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
        }
    }

    /// Classifies a non-success response.
    ///
    /// The remote `message` field wins, otherwise the operation fallback is used.
    #[must_use]
    pub fn from_response(operation: Operation, response: &ApiResponse) -> Self {
        Self::Remote {
            status: response.status(),
            message: response
                .error_message()
                .unwrap_or_else(|| operation.fallback_message().to_string()),
        }
    }

    /// Classifies a call that produced no response at all.
    #[must_use]
    pub fn transport(operation: Operation, source: TransportError) -> Self {
        Self::Transport {
            message: operation.fallback_message().to_string(),
            source,
        }
    }

    /// Creates error for a success response whose body could not be decoded.
    #[must_use]
    pub fn invalid_response(operation: Operation, source: Option<serde_json::Error>) -> Self {
        Self::InvalidResponse {
            message: operation.fallback_message().to_string(),
            source,
        }
    }

    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::SessionExpired { message }
            | Self::Remote { message, .. }
            | Self::Transport { message, .. }
            | Self::InvalidResponse { message, .. } => message,
        }
    }

    /// Returns the HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::SessionExpired { .. } => Some(401),
            Self::Remote { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Returns whether the session was torn down by this failure.
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// Returns whether no response was received.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(400 ; "bad_request")]
    #[test_case(403 ; "forbidden")]
    #[test_case(404 ; "not_found")]
    #[test_case(500 ; "server_error")]
    fn test_remote_message_wins(status: u16) {
        let response = ApiResponse::json_body(status, &json!({ "message": "X" }));
        let error = ApiError::from_response(Operation::GenerateCode, &response);

        assert_eq!(error.to_string(), "X");
        assert_eq!(error.status(), Some(status));
    }

    #[test]
    fn test_fallback_when_payload_lacks_message() {
        let response = ApiResponse::new(503, "Service Unavailable");
        let error = ApiError::from_response(Operation::ExplainCode, &response);

        assert_eq!(error.message(), "Failed to explain code");
    }

    #[test]
    fn test_transport_error_hides_internal_text() {
        let error = ApiError::transport(
            Operation::DebugCode,
            TransportError::Connect("tcp connect error: Connection refused (os error 111)".into()),
        );

        assert_eq!(error.to_string(), "Failed to debug code");
        assert!(error.is_network_error());
        assert_eq!(error.status(), None);
    }

    #[test]
    fn test_session_expired_default_message() {
        let error = ApiError::session_expired(None);
        assert!(error.is_session_expired());
        assert_eq!(error.message(), SESSION_EXPIRED_MESSAGE);
    }
}

//! Network-level failures.

use thiserror::Error;

/// Failure before any HTTP response was received.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// No answer within the timeout.
    #[error("request timed out")]
    Timeout,

    /// Could not connect.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Request could not be built.
    #[error("failed to build request: {0}")]
    InvalidRequest(String),

    /// Anything else.
    #[error("transport error: {0}")]
    Other(String),
}

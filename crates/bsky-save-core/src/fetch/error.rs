//! Fetch error types.

use thiserror::Error;

/// Failure reported by the transport itself. Cloneable so one failure can
/// reject the header wait and every body accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    TimedOut,
    #[error("transport error: {0}")]
    Failed(String),
    /// The transport dropped its event channel without reporting.
    #[error("transport closed before completion")]
    Closed,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

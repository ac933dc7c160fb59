//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Engine cannot be built from the given configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Failed to connect to the completion service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the completion service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// No deployment to send the request to
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Non-success status from the service
    #[error("Server error: status {status}: {message}")]
    ServerError { status: u16, message: String },
}

impl InferenceError {
    /// Classify a transport error, reporting the configured timeout
    pub fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }

    /// Short label for log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::RequestFailed(_) => "request_failed",
            Self::ModelNotAvailable(_) => "model_not_available",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Timeout(_) => "timeout",
            Self::RateLimited => "rate_limited",
            Self::ServerError { .. } => "server_error",
        }
    }
}

//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// The completion service answered without usable content
    #[error("Inference returned no content")]
    EmptyResponse,

    /// External service error (transport level)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// The external service answered with a non-success status
    #[error("Rejected by external service with status {status}")]
    Rejected { status: u16 },

    /// Outbound call exceeded its timeout
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Short label for structured log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Inference(_) => "inference",
            Self::EmptyResponse => "empty_response",
            Self::ExternalService(_) => "external_service",
            Self::Rejected { .. } => "rejected",
            Self::Timeout(_) => "timeout",
            Self::RateLimited => "rate_limited",
            Self::Configuration(_) => "configuration",
        }
    }
}

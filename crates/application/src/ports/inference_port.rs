//! Inference port - Interface for LLM completion

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content, if the service returned any
    pub content: Option<String>,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for inference operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a response for a single message, without history or system prompt
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError>;

    /// Name of the configured model / deployment, `None` when unset
    fn current_model(&self) -> Option<String>;
}

//! Azure OpenAI inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{
    AzureOpenAIEngine, CompletionConfig, InferenceEngine, InferenceError, InferenceRequest,
};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for an Azure OpenAI chat-completion deployment
#[derive(Debug)]
pub struct AzureInferenceAdapter {
    engine: AzureOpenAIEngine,
}

impl AzureInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: CompletionConfig) -> Result<Self, ApplicationError> {
        let engine = AzureOpenAIEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::Timeout(ms) => ApplicationError::Timeout(ms),
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Azure OpenAI connection failed: {msg}"))
            },
            InferenceError::Configuration(msg) | InferenceError::ModelNotAvailable(msg) => {
                ApplicationError::Configuration(msg)
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for AzureInferenceAdapter {
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let response = self
            .engine
            .generate(InferenceRequest::simple(message))
            .await
            .map_err(Self::map_error)?;

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    fn current_model(&self) -> Option<String> {
        self.engine.default_model().map(str::to_string)
    }
}

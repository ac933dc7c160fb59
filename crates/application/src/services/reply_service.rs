//! Reply service - Turns an inbound text into reply text

use std::{fmt, sync::Arc};

use tracing::{debug, error, instrument, warn};

use crate::{error::ApplicationError, ports::InferencePort};

/// Reply used when no deployment is configured
pub const REPLY_NOT_CONFIGURED: &str = "Error: Azure OpenAI deployment not configured";

/// Reply used when the completion service returned no usable content
pub const REPLY_EMPTY: &str = "Sorry, I couldn't generate a response.";

/// Reply used when the completion call failed
pub const REPLY_FAILED: &str = "Sorry, there was an error generating the response.";

/// Service generating exactly one reply per inbound text
///
/// The user text is forwarded as a single user message with no history and
/// no system prompt. [`ReplyService::generate`] never fails: every error
/// degrades to one of the fixed fallback replies.
pub struct ReplyService {
    inference: Arc<dyn InferencePort>,
}

impl fmt::Debug for ReplyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyService")
            .field("model", &self.inference.current_model())
            .finish_non_exhaustive()
    }
}

impl ReplyService {
    /// Create a new reply service
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    /// Whether a deployment is configured
    pub fn is_configured(&self) -> bool {
        self.inference.current_model().is_some()
    }

    /// Generate a reply, surfacing why it could not be produced
    ///
    /// # Errors
    ///
    /// - `Configuration` when no deployment is configured (no call is made)
    /// - `EmptyResponse` when the service answered with empty or blank content
    /// - any error from the inference port
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn try_generate(&self, text: &str) -> Result<String, ApplicationError> {
        let Some(model) = self.inference.current_model() else {
            return Err(ApplicationError::Configuration(
                "completion deployment not configured".to_string(),
            ));
        };

        let result = self.inference.generate(text).await?;

        debug!(
            deployment = %model,
            model = %result.model,
            tokens = ?result.tokens_used,
            latency_ms = result.latency_ms,
            "Completion received"
        );

        match result.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(ApplicationError::EmptyResponse),
        }
    }

    /// Generate a reply, falling back to a fixed text on any failure
    pub async fn generate(&self, text: &str) -> String {
        match self.try_generate(text).await {
            Ok(reply) => reply,
            Err(ApplicationError::Configuration(reason)) => {
                warn!(%reason, "Replying with configuration notice");
                REPLY_NOT_CONFIGURED.to_string()
            },
            Err(ApplicationError::EmptyResponse) => {
                warn!("Completion returned no content");
                REPLY_EMPTY.to_string()
            },
            Err(e) => {
                error!(kind = e.kind(), error = %e, "Completion failed");
                REPLY_FAILED.to_string()
            },
        }
    }
}

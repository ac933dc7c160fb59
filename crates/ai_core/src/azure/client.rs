//! Azure OpenAI client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::CompletionConfig;
use crate::error::InferenceError;
use crate::ports::{
    InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage,
};

/// Completion engine backed by an Azure OpenAI deployment
pub struct AzureOpenAIEngine {
    client: Client,
    config: CompletionConfig,
}

impl std::fmt::Debug for AzureOpenAIEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureOpenAIEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AzureOpenAIEngine {
    /// Create a new engine
    ///
    /// The endpoint and API key are required. The deployment is not: without
    /// it the engine exists but every `generate` call fails.
    pub fn new(config: CompletionConfig) -> Result<Self, InferenceError> {
        if config.endpoint.trim().is_empty() {
            return Err(InferenceError::Configuration(
                "endpoint is required".to_string(),
            ));
        }
        if config.api_key.is_empty() {
            return Err(InferenceError::Configuration(
                "api_key is required".to_string(),
            ));
        }

        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms));
        if config.bypass_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::Configuration(e.to_string()))?;

        info!(
            endpoint = %config.endpoint,
            deployment = ?config.deployment(),
            api_version = %config.api_version,
            "Initialized Azure OpenAI engine"
        );

        Ok(Self { client, config })
    }

    /// Build the chat-completions URL for a deployment
    fn completions_url(&self, deployment: &str) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.config.endpoint.trim_end_matches('/'),
            deployment
        )
    }
}

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [InferenceMessage],
}

/// Chat-completions response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl InferenceEngine for AzureOpenAIEngine {
    #[instrument(skip(self, request), fields(deployment = ?self.config.deployment()))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let Some(deployment) = self.config.deployment() else {
            return Err(InferenceError::ModelNotAvailable(
                "no deployment configured".to_string(),
            ));
        };

        let body = ChatCompletionRequest {
            messages: &request.messages,
        };

        debug!(messages = request.messages.len(), "Sending chat completion request");

        let response = self
            .client
            .post(self.completions_url(deployment))
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_transport(&e, self.config.timeout_ms))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Completion service rate limited the request");
            return Err(InferenceError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request failed");
            return Err(InferenceError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let (content, finish_reason) = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| {
                (
                    choice.message.and_then(|m| m.content),
                    choice.finish_reason,
                )
            })
            .unwrap_or_default();

        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(
            tokens = ?usage,
            has_content = content.is_some(),
            "Chat completion finished"
        );

        Ok(InferenceResponse {
            content,
            model: completion.model.unwrap_or_else(|| deployment.to_string()),
            usage,
            finish_reason,
        })
    }

    fn default_model(&self) -> Option<&str> {
        self.config.deployment()
    }
}

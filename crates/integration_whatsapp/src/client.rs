//! WhatsApp client for sending messages
//!
//! Uses the Meta Graph API to send WhatsApp text messages.

use std::time::Duration;

use domain::{OutboundMessage, RecipientId};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    #[error("Send rejected with status {status}")]
    Rejected { status: u16 },

    #[error("Missing configuration: {0}")]
    Configuration(String),
}

impl WhatsAppError {
    fn from_transport(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// WhatsApp client configuration
#[derive(Clone)]
pub struct WhatsAppClientConfig {
    /// Meta Graph API access token
    pub access_token: String,
    /// Phone number ID from WhatsApp Business (the sender identity)
    pub phone_number_id: String,
    /// API version (default: v19.0)
    pub api_version: String,
    /// Graph API base URL
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Ignore proxy settings inherited from the environment
    pub bypass_proxy: bool,
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            api_version: "v19.0".to_string(),
            base_url: "https://graph.facebook.com".to_string(),
            timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            bypass_proxy: false,
        }
    }
}

impl std::fmt::Debug for WhatsAppClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClientConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("bypass_proxy", &self.bypass_proxy)
            .finish()
    }
}

/// WhatsApp client for the Meta Graph API
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    client: Client,
    config: WhatsAppClientConfig,
    messages_url: String,
}

/// Message send request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    msg_type: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    body: &'a str,
}

impl<'a> SendMessageRequest<'a> {
    fn text(to: &'a RecipientId, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to: to.as_str(),
            msg_type: "text",
            text: TextContent { body },
        }
    }
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.phone_number_id.is_empty() {
            return Err(WhatsAppError::Configuration(
                "phone_number_id is required".to_string(),
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
            .map_err(|e| WhatsAppError::Configuration(e.to_string()))?;

        let messages_url = format!(
            "{}/{}/{}/messages",
            config.base_url.trim_end_matches('/'),
            config.api_version,
            config.phone_number_id
        );

        Ok(Self {
            client,
            config,
            messages_url,
        })
    }

    /// URL of the send endpoint
    #[must_use]
    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// Send a text message
    ///
    /// Returns the HTTP status on success. The response body is not read.
    #[instrument(skip(self, message), fields(to = %message.recipient))]
    pub async fn send_message(&self, message: &OutboundMessage) -> Result<u16, WhatsAppError> {
        let request = SendMessageRequest::text(&message.recipient, &message.text);

        debug!(message_len = message.text.len(), "Sending WhatsApp message");

        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| WhatsAppError::from_transport(&e, self.config.timeout_ms))?;

        let status = response.status();
        debug!(status = status.as_u16(), "WhatsApp send responded");

        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(WhatsAppError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

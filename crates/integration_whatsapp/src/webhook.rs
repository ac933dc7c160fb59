//! WhatsApp webhook payload parsing
//!
//! The Cloud API posts a nested envelope
//! `entry[0].changes[0].value.{messages|statuses}`. Every field is optional
//! here so that a missing key surfaces as a [`WebhookError`] naming the path
//! rather than an opaque serde message.

use domain::{DomainError, InboundEvent, InboundMessage, StatusUpdate};
use serde::Deserialize;
use thiserror::Error;

/// Errors while turning a webhook body into an [`InboundEvent`]
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body is not JSON or does not have the envelope shape
    #[error("Invalid payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required key is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The message is present but unusable (bad sender, empty text)
    #[error("Invalid message: {0}")]
    InvalidMessage(#[from] DomainError),
}

impl WebhookError {
    /// Short label for log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidJson(_) => "invalid_json",
            Self::MissingField(_) => "missing_field",
            Self::InvalidMessage(_) => "invalid_message",
        }
    }
}

/// WhatsApp webhook envelope
#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Option<Vec<WebhookEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub changes: Option<Vec<WebhookChange>>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<WebhookValue>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookValue {
    #[serde(default)]
    pub messaging_product: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<WebhookMessage>>,
    #[serde(default)]
    pub statuses: Option<Vec<WebhookStatus>>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMessage {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, rename = "type")]
    pub msg_type: Option<String>,
    #[serde(default)]
    pub text: Option<TextMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TextMessage {
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookStatus {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub recipient_id: Option<String>,
}

impl WebhookPayload {
    /// Parse a raw webhook body
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// The first change value, `entry[0].changes[0].value`
    pub fn first_value(&self) -> Result<&WebhookValue, WebhookError> {
        let entry = self
            .entry
            .as_deref()
            .ok_or(WebhookError::MissingField("entry"))?
            .first()
            .ok_or(WebhookError::MissingField("entry[0]"))?;

        let change = entry
            .changes
            .as_deref()
            .ok_or(WebhookError::MissingField("entry[0].changes"))?
            .first()
            .ok_or(WebhookError::MissingField("entry[0].changes[0]"))?;

        change
            .value
            .as_ref()
            .ok_or(WebhookError::MissingField("entry[0].changes[0].value"))
    }

    /// Classify the payload
    ///
    /// `messages` takes precedence over `statuses`; a payload with neither is
    /// [`InboundEvent::Unrecognized`].
    pub fn to_event(&self) -> Result<InboundEvent, WebhookError> {
        let value = self.first_value()?;

        if let Some(messages) = &value.messages {
            let message = messages
                .first()
                .ok_or(WebhookError::MissingField("messages[0]"))?;
            return message_event(message);
        }

        if let Some(statuses) = &value.statuses {
            let status = statuses
                .first()
                .ok_or(WebhookError::MissingField("statuses[0]"))?;
            return status_event(status);
        }

        Ok(InboundEvent::Unrecognized)
    }
}

fn message_event(message: &WebhookMessage) -> Result<InboundEvent, WebhookError> {
    let sender = message
        .from
        .as_deref()
        .ok_or(WebhookError::MissingField("messages[0].from"))?;
    let body = message
        .text
        .as_ref()
        .and_then(|t| t.body.clone())
        .ok_or(WebhookError::MissingField("messages[0].text.body"))?;

    let inbound = InboundMessage::new(sender, message.id.clone(), body)?;
    Ok(InboundEvent::Message(inbound))
}

fn status_event(status: &WebhookStatus) -> Result<InboundEvent, WebhookError> {
    let state = status
        .status
        .clone()
        .ok_or(WebhookError::MissingField("statuses[0].status"))?;
    let message_id = status
        .id
        .clone()
        .ok_or(WebhookError::MissingField("statuses[0].id"))?;

    Ok(InboundEvent::Status(StatusUpdate {
        status: state,
        message_id,
        recipient: status.recipient_id.clone(),
    }))
}

/// Parse a raw webhook body into an [`InboundEvent`]
pub fn parse_event(body: &[u8]) -> Result<InboundEvent, WebhookError> {
    WebhookPayload::from_slice(body)?.to_event()
}

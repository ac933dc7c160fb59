//! Inbound webhook events
//!
//! The messaging platform wraps either a user message or a delivery-status
//! update in the same envelope. Only user messages with text trigger a reply.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::RecipientId;

/// A user message carrying text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Who sent the message (and who receives the reply)
    pub sender: RecipientId,
    /// Platform message id, when present
    pub message_id: Option<String>,
    /// Text body, never empty
    pub text: String,
}

impl InboundMessage {
    /// Create a new inbound message
    ///
    /// Fails when the sender id is invalid or the text is empty.
    pub fn new(
        sender: &str,
        message_id: Option<String>,
        text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.is_empty() {
            return Err(DomainError::EmptyMessage);
        }

        Ok(Self {
            sender: RecipientId::new(sender)?,
            message_id,
            text,
        })
    }
}

/// A delivery-status update for a message we sent earlier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Status string (`sent`, `delivered`, `read`, `failed`, ...)
    pub status: String,
    /// Id of the message the status refers to
    pub message_id: String,
    /// Recipient of the original message, when present
    pub recipient: Option<String>,
}

/// An inbound event extracted from `entry[0].changes[0].value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundEvent {
    /// A user message to reply to
    Message(InboundMessage),
    /// A delivery-status update (logged only)
    Status(StatusUpdate),
    /// Neither `messages` nor `statuses` present
    Unrecognized,
}

impl InboundEvent {
    /// Short label for log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Status(_) => "status",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Whether this event should produce a reply
    #[must_use]
    pub const fn wants_reply(&self) -> bool {
        matches!(self, Self::Message(_))
    }
}

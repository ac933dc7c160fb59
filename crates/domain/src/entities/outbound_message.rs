//! Outbound reply

use serde::{Deserialize, Serialize};

use crate::value_objects::RecipientId;

/// A text reply addressed to a WhatsApp user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Recipient id
    pub recipient: RecipientId,
    /// Reply text
    pub text: String,
}

impl OutboundMessage {
    /// Create a new outbound message
    #[must_use]
    pub fn new(recipient: RecipientId, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
        }
    }
}

//! Message dispatcher - Delivers reply text to a WhatsApp user

use std::{fmt, sync::Arc};

use domain::{OutboundMessage, RecipientId};
use tracing::{error, info, instrument, warn};

use crate::{error::ApplicationError, ports::MessengerPort};

/// Sends replies through the messenger port
///
/// Failures are logged and swallowed in [`MessageDispatcher::send`]; the
/// inbound webhook is acknowledged regardless of delivery.
pub struct MessageDispatcher {
    messenger: Arc<dyn MessengerPort>,
}

impl fmt::Debug for MessageDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageDispatcher").finish_non_exhaustive()
    }
}

impl MessageDispatcher {
    /// Create a new dispatcher
    pub fn new(messenger: Arc<dyn MessengerPort>) -> Self {
        Self { messenger }
    }

    /// Send a text, returning the upstream status
    ///
    /// # Errors
    ///
    /// - `Domain` when `recipient` is not a valid WhatsApp id
    /// - `Rejected` when the platform answered with a non-success status
    /// - any transport error from the messenger port
    pub async fn try_send(&self, recipient: &str, text: &str) -> Result<u16, ApplicationError> {
        let recipient = RecipientId::new(recipient)?;
        let message = OutboundMessage::new(recipient, text);
        self.messenger.send_text(&message).await
    }

    /// Send a text, logging the outcome
    #[instrument(skip(self, recipient, text), fields(text_len = text.len()))]
    pub async fn send(&self, recipient: &str, text: &str) {
        match self.try_send(recipient, text).await {
            Ok(status) => info!(status, "Reply sent"),
            Err(ApplicationError::Rejected { status }) => {
                warn!(status, "Reply rejected by WhatsApp");
            },
            Err(e) => error!(kind = e.kind(), error = %e, "Reply could not be sent"),
        }
    }
}

//! WhatsApp messenger adapter
//!
//! Implements the `MessengerPort` trait using the WhatsApp integration crate.

use application::{error::ApplicationError, ports::MessengerPort};
use async_trait::async_trait;
use domain::OutboundMessage;
use integration_whatsapp::{WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
use tracing::instrument;

/// Adapter that implements `MessengerPort` using `WhatsAppClient`
pub struct WhatsAppMessengerAdapter {
    /// The underlying WhatsApp client
    client: WhatsAppClient,
}

impl WhatsAppMessengerAdapter {
    /// Create a new WhatsApp messenger adapter
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        let client = WhatsAppClient::new(config)?;
        Ok(Self { client })
    }

    /// Get a reference to the underlying client
    #[must_use]
    pub const fn client(&self) -> &WhatsAppClient {
        &self.client
    }

    fn map_error(e: WhatsAppError) -> ApplicationError {
        match e {
            WhatsAppError::Rejected { status } => ApplicationError::Rejected { status },
            WhatsAppError::Timeout(ms) => ApplicationError::Timeout(ms),
            WhatsAppError::Configuration(msg) => ApplicationError::Configuration(msg),
            WhatsAppError::Request(msg) => {
                ApplicationError::ExternalService(format!("WhatsApp send failed: {msg}"))
            },
        }
    }
}

impl std::fmt::Debug for WhatsAppMessengerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppMessengerAdapter")
            .field("messages_url", &self.client.messages_url())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MessengerPort for WhatsAppMessengerAdapter {
    #[instrument(skip(self, message), fields(text_len = message.text.len()))]
    async fn send_text(&self, message: &OutboundMessage) -> Result<u16, ApplicationError> {
        self.client
            .send_message(message)
            .await
            .map_err(Self::map_error)
    }
}

//! Messenger port - Interface for sending replies

use async_trait::async_trait;
use domain::OutboundMessage;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the outbound messaging platform
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Send a text message
    ///
    /// Returns the HTTP status of the send call. A non-success status is
    /// `ApplicationError::Rejected`.
    async fn send_text(&self, message: &OutboundMessage) -> Result<u16, ApplicationError>;
}

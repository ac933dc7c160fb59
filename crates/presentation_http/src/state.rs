//! Application state shared across handlers

use std::sync::Arc;

use application::{MessageDispatcher, ReplyService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generates reply text for inbound messages
    pub reply_service: Arc<ReplyService>,
    /// Sends replies back to WhatsApp
    pub dispatcher: Arc<MessageDispatcher>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("reply_service", &self.reply_service)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

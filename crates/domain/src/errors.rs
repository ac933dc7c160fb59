//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid WhatsApp recipient / sender id
    #[error("Invalid recipient id: {0}")]
    InvalidRecipient(String),

    /// A user message without any text
    #[error("Message text is empty")]
    EmptyMessage,
}

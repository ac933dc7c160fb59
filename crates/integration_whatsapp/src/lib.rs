//! WhatsApp integration
//!
//! Parses WhatsApp Business webhooks and sends text messages through the
//! Graph API.

pub mod client;
pub mod webhook;

pub use client::{WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
pub use webhook::{WebhookError, WebhookPayload, parse_event};

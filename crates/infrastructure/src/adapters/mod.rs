//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod azure_inference_adapter;
mod whatsapp_adapter;

pub use azure_inference_adapter::AzureInferenceAdapter;
pub use whatsapp_adapter::WhatsAppMessengerAdapter;

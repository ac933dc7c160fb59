//! AI Core - Chat completion client
//!
//! Provides an abstraction for single-turn LLM completion and an
//! implementation for Azure OpenAI chat-completion deployments.

pub mod azure;
pub mod config;
pub mod error;
pub mod ports;

pub use azure::AzureOpenAIEngine;
pub use config::CompletionConfig;
pub use error::InferenceError;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};

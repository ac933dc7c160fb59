//! Azure OpenAI inference engine implementation
//!
//! Talks to the `chat/completions` route of a deployment.

mod client;

pub use client::AzureOpenAIEngine;

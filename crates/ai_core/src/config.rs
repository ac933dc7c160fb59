//! Configuration for the completion engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for the completion engine
#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    #[serde(default)]
    pub endpoint: String,

    /// API key sent in the `api-key` header
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Deployment name; without it no completion can be requested
    #[serde(default)]
    pub deployment: Option<String>,

    /// REST API version query parameter
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Ignore proxy settings inherited from the environment
    #[serde(default)]
    pub bypass_proxy: bool,
}

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

const fn default_timeout_ms() -> u64 {
    60_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: None,
            api_version: default_api_version(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            bypass_proxy: false,
        }
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    None
                } else {
                    Some("[REDACTED]")
                },
            )
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("bypass_proxy", &self.bypass_proxy)
            .finish()
    }
}

impl CompletionConfig {
    /// Configured deployment, treating an empty string as absent
    #[must_use]
    pub fn deployment(&self) -> Option<&str> {
        self.deployment.as_deref().filter(|d| !d.trim().is_empty())
    }
}

//! Completion service configuration.

use ai_core::CompletionConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Azure OpenAI completion configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionAppConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Deployment name; replies degrade to a fixed notice when unset
    #[serde(default)]
    pub deployment: Option<String>,

    /// REST API version (default: 2024-02-01)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Completion request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Ignore HTTP(S)_PROXY from the environment for completion calls
    #[serde(default)]
    pub bypass_proxy: bool,
}

impl std::fmt::Debug for CompletionAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionAppConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
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

fn default_api_version() -> String {
    "2024-02-01".to_string()
}

const fn default_timeout_ms() -> u64 {
    60_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for CompletionAppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: None,
            api_version: default_api_version(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            bypass_proxy: false,
        }
    }
}

impl CompletionAppConfig {
    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Deployment name, `None` when unset or blank
    #[must_use]
    pub fn deployment(&self) -> Option<&str> {
        self.deployment
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Build the engine configuration
    #[must_use]
    pub fn to_engine_config(&self) -> CompletionConfig {
        CompletionConfig {
            endpoint: self.endpoint.clone().unwrap_or_default(),
            api_key: self.api_key_str().unwrap_or_default().to_string(),
            deployment: self.deployment().map(str::to_string),
            api_version: self.api_version.clone(),
            timeout_ms: self.timeout_ms,
            connect_timeout_ms: self.connect_timeout_ms,
            bypass_proxy: self.bypass_proxy,
        }
    }
}

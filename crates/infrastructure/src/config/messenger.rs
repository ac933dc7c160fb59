//! WhatsApp configuration: webhook handshake and Graph API credentials.

use integration_whatsapp::WhatsAppClientConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// WhatsApp integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Verify token for webhook setup
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Meta Graph API access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Phone number ID from WhatsApp Business
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// API version (default: v19.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Graph API base URL
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    /// Send request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Ignore HTTP(S)_PROXY from the environment for send calls
    #[serde(default)]
    pub bypass_proxy: bool,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field(
                "verify_token",
                &if self.verify_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("phone_number_id", &self.phone_number_id)
            .field("api_version", &self.api_version)
            .field("graph_base_url", &self.graph_base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("bypass_proxy", &self.bypass_proxy)
            .finish()
    }
}

fn default_api_version() -> String {
    "v19.0".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            verify_token: None,
            access_token: None,
            phone_number_id: None,
            api_version: default_api_version(),
            graph_base_url: default_graph_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            bypass_proxy: false,
        }
    }
}

impl WhatsAppConfig {
    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Verify token, empty when unset
    #[must_use]
    pub fn verify_token_str(&self) -> &str {
        self.verify_token.as_deref().unwrap_or_default()
    }

    /// Build the Graph API client configuration
    #[must_use]
    pub fn to_client_config(&self) -> WhatsAppClientConfig {
        WhatsAppClientConfig {
            access_token: self.access_token_str().unwrap_or_default().to_string(),
            phone_number_id: self.phone_number_id.clone().unwrap_or_default(),
            api_version: self.api_version.clone(),
            base_url: self.graph_base_url.clone(),
            timeout_ms: self.timeout_ms,
            connect_timeout_ms: self.connect_timeout_ms,
            bypass_proxy: self.bypass_proxy,
        }
    }
}

//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `messenger`: WhatsApp webhook and Graph API settings
//! - `completion`: Azure OpenAI settings
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file
//! (`config.toml`, or the path in `RELAY_CONFIG`), `RELAY__SECTION__KEY`
//! environment variables, and finally the flat variable names used by
//! existing deployments (`VERIFY_TOKEN`, `WHATSAPP_TOKEN`, ...).

mod completion;
mod messenger;
mod server;

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use completion::CompletionAppConfig;
pub use messenger::WhatsAppConfig;
pub use server::{LogFormat, ServerConfig};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

/// Prefix for structured environment overrides
const ENV_PREFIX: &str = "RELAY";

/// Flat environment variables and the config keys they override
const LEGACY_ENV: [(&str, &str); 6] = [
    ("VERIFY_TOKEN", "whatsapp.verify_token"),
    ("WHATSAPP_TOKEN", "whatsapp.access_token"),
    ("PHONE_NUMBER_ID", "whatsapp.phone_number_id"),
    ("AZURE_OPENAI_API_KEY", "completion.api_key"),
    ("AZURE_OPENAI_ENDPOINT", "completion.endpoint"),
    ("AZURE_OPENAI_DEPLOYMENT", "completion.deployment"),
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A required value is absent or empty
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// WhatsApp configuration
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Completion service configuration
    #[serde(default)]
    pub completion: CompletionAppConfig,
}

impl AppConfig {
    /// Load configuration from the process environment and optional file
    pub fn load() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_from_env(&env)
    }

    /// Load configuration from the given environment snapshot and optional file
    pub fn load_from_env(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?;

        // Load from file if exists
        builder = match env.get(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(path) => {
                debug!(path = %path, "Loading configuration file");
                builder.add_source(config::File::from(Path::new(path)))
            },
            None => builder.add_source(config::File::with_name("config").required(false)),
        };

        // Override with environment variables (e.g., RELAY__SERVER__PORT)
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(Some(env.clone())),
        );

        for (name, key) in LEGACY_ENV {
            let value = env.get(name).filter(|v| !v.trim().is_empty()).cloned();
            builder = builder.set_override_option(key, value)?;
        }

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check that everything needed to serve is present
    ///
    /// A missing deployment is accepted with a warning: the relay still runs
    /// and answers with a configuration notice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(self.whatsapp.verify_token.as_deref()) {
            return Err(ConfigError::Missing("whatsapp.verify_token"));
        }
        if is_blank(self.whatsapp.access_token_str()) {
            return Err(ConfigError::Missing("whatsapp.access_token"));
        }
        if is_blank(self.whatsapp.phone_number_id.as_deref()) {
            return Err(ConfigError::Missing("whatsapp.phone_number_id"));
        }
        if is_blank(self.completion.endpoint.as_deref()) {
            return Err(ConfigError::Missing("completion.endpoint"));
        }
        if is_blank(self.completion.api_key_str()) {
            return Err(ConfigError::Missing("completion.api_key"));
        }
        if self.completion.deployment().is_none() {
            warn!("completion.deployment is not set, replies will carry a configuration notice");
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

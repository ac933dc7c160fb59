//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and owns process-level
//! concerns: configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, CompletionAppConfig, ConfigError, LogFormat, ServerConfig, WhatsAppConfig,
};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};

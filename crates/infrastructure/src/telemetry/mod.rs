//! Logging initialization
//!
//! Console logging through `tracing-subscriber`, either human-readable or
//! one JSON object per event.

mod logging;

pub use logging::{DEFAULT_LOG_FILTER, TelemetryError, init_tracing};

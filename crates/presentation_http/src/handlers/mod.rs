//! HTTP request handlers

pub mod health;
pub mod root;
pub mod webhook;

use serde::{Deserialize, Serialize};

/// `{"status": "ok"}` body shared by health and webhook acknowledgements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// The `ok` status
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

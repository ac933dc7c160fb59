//! Root liveness message

use axum::Json;
use serde::{Deserialize, Serialize};

/// Message served on `/`
pub const ROOT_MESSAGE: &str = "WhatsApp relay is running";

/// Root response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Confirms the process is up
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

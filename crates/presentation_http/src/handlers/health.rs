//! Health check handler

use axum::Json;

use super::StatusResponse;

/// Liveness check - is the server running?
///
/// Answers `ok` regardless of configuration.
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

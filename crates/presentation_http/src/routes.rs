//! Route definitions

use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::RequestIdLayer, state::AppState};

/// Create the main router with all routes and middleware
///
/// Request bodies are capped at `server.max_body_bytes`. The webhook POST
/// handler sees an oversized body as a rejection and still acknowledges it.
/// Every response carries an `X-Request-Id` header.
pub fn create_router(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        // Status endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::health::health_check))
        // WhatsApp webhook
        .route(
            "/webhook",
            get(handlers::webhook::verify_webhook).post(handlers::webhook::receive_webhook),
        )
        // Attach state
        .with_state(state)
        // Middleware (last added = outermost)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(RequestIdLayer::new())
}

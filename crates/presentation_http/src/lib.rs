//! WhatsApp relay HTTP presentation layer
//!
//! This crate provides the webhook endpoints and the server binary.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;

//! Application layer - Use cases and orchestration
//!
//! Defines the ports the relay talks through and the two services of a relay
//! cycle: generating a reply and dispatching it.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;

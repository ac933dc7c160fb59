//! Domain layer for the WhatsApp relay
//!
//! Contains the request-scoped values that flow through a relay cycle:
//! inbound webhook events, the verification handshake and outbound replies.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

//! Entities - Transient values of a single relay cycle

pub mod inbound_event;
pub mod outbound_message;
pub mod verification;

pub use inbound_event::{InboundEvent, InboundMessage, StatusUpdate};
pub use outbound_message::OutboundMessage;
pub use verification::{SUBSCRIBE_MODE, VerificationRequest};

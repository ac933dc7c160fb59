//! Application services - Use case implementations

mod message_dispatcher;
mod reply_service;

pub use message_dispatcher::MessageDispatcher;
pub use reply_service::{REPLY_EMPTY, REPLY_FAILED, REPLY_NOT_CONFIGURED, ReplyService};

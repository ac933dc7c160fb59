//! Value objects - Immutable, validated values

pub mod recipient_id;

pub use recipient_id::RecipientId;

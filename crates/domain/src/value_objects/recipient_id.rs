//! WhatsApp id value object
//!
//! The Cloud API identifies users by their phone number in international
//! format without the leading `+` (e.g. `15551234567`). Inbound webhooks
//! deliver ids in that form and the send endpoint expects the same.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const MIN_DIGITS: usize = 6;
const MAX_DIGITS: usize = 20;

/// A validated WhatsApp id (digits only)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipientId {
    value: String,
}

impl RecipientId {
    /// Create a new recipient id
    ///
    /// Accepts an optional leading `+` and common separators (space, `-`,
    /// parentheses), which are stripped. What remains must be 6-20 ASCII digits.
    pub fn new(id: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = id.as_ref().trim();
        let value: String = raw
            .strip_prefix('+')
            .unwrap_or(raw)
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();

        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidRecipient(raw.to_string()));
        }

        if !(MIN_DIGITS..=MAX_DIGITS).contains(&value.len()) {
            return Err(DomainError::InvalidRecipient(raw.to_string()));
        }

        Ok(Self { value })
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for RecipientId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RecipientId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecipientId> for String {
    fn from(id: RecipientId) -> Self {
        id.value
    }
}

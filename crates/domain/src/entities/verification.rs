//! Webhook subscription handshake
//!
//! Meta proves that we own the callback URL by sending a GET with
//! `hub.mode`, `hub.verify_token` and `hub.challenge`. We answer with the
//! challenge only if the token matches our configured secret.

use serde::Deserialize;
use subtle::ConstantTimeEq;

/// The only mode accepted during the handshake
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// Query parameters of a verification request
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VerificationRequest {
    /// Should be "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// Token to compare against the configured secret
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// Value to echo back on success
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

impl VerificationRequest {
    /// Check the handshake against the expected token
    ///
    /// Returns the challenge to echo on success. An empty expected token
    /// never verifies.
    pub fn verify(&self, expected_token: &str) -> Option<&str> {
        if self.mode.as_deref() != Some(SUBSCRIBE_MODE) || expected_token.is_empty() {
            return None;
        }

        let token = self.verify_token.as_deref()?;
        if !bool::from(token.as_bytes().ct_eq(expected_token.as_bytes())) {
            return None;
        }

        self.challenge.as_deref()
    }
}

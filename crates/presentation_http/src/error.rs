//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Handshake mode or token did not match
    #[error("Verification failed")]
    VerificationFailed,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::VerificationFailed => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_failed_message() {
        assert_eq!(ApiError::VerificationFailed.to_string(), "Verification failed");
    }

    #[test]
    fn verification_failed_is_forbidden() {
        let response = ApiError::VerificationFailed.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

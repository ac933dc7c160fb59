//! WhatsApp webhook handlers
//!
//! `GET` answers the subscription handshake, `POST` receives events and
//! relays each text message through the completion service and back.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
};
use domain::{InboundEvent, VerificationRequest};
use integration_whatsapp::parse_event;
use tracing::{debug, info, instrument, warn};

use super::StatusResponse;
use crate::{error::ApiError, state::AppState};

/// WhatsApp webhook verification (GET)
///
/// Meta sends a GET request to verify webhook ownership during setup. The
/// challenge is echoed verbatim when mode and token match; anything else,
/// missing parameters included, is a 403.
#[instrument(skip(state, query))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    query: Result<Query<VerificationRequest>, QueryRejection>,
) -> Result<String, ApiError> {
    let request = query.map(|Query(q)| q).unwrap_or_default();

    match request.verify(state.config.whatsapp.verify_token_str()) {
        Some(challenge) => {
            info!("WhatsApp webhook verified successfully");
            Ok(challenge.to_string())
        },
        None => {
            warn!(mode = ?request.mode, "WhatsApp webhook verification failed");
            Err(ApiError::VerificationFailed)
        },
    }
}

/// WhatsApp webhook event handler (POST)
///
/// Always acknowledges with `{"status": "ok"}` so the platform does not
/// redeliver. Any failure, an oversized body included, is only logged.
#[instrument(skip(state, body))]
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<StatusResponse> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Ignoring unreadable webhook body"
            );
            return Json(StatusResponse::ok());
        },
    };

    debug!(body_len = body.len(), "Webhook event received");

    match parse_event(&body) {
        Ok(InboundEvent::Message(message)) => {
            info!(
                message_id = ?message.message_id,
                text_len = message.text.len(),
                "Processing WhatsApp message"
            );
            let reply = state.reply_service.generate(&message.text).await;
            state.dispatcher.send(message.sender.as_str(), &reply).await;
        },
        Ok(InboundEvent::Status(update)) => {
            info!(
                status = %update.status,
                message_id = %update.message_id,
                "WhatsApp status update"
            );
        },
        Ok(InboundEvent::Unrecognized) => {
            debug!("Webhook event without messages or statuses");
        },
        Err(e) => {
            warn!(kind = e.kind(), error = %e, "Ignoring malformed webhook payload");
        },
    }

    Json(StatusResponse::ok())
}

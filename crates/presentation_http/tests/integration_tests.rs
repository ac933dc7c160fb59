//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use application::{
    MessageDispatcher, REPLY_EMPTY, REPLY_FAILED, REPLY_NOT_CONFIGURED, ReplyService,
    error::ApplicationError,
    ports::{InferencePort, InferenceResult, MessengerPort},
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use domain::OutboundMessage;
use infrastructure::{AppConfig, ServerConfig, WhatsAppConfig};
use presentation_http::{routes::create_router, state::AppState};
use serde_json::json;
use uuid::Uuid;

// =============================================================================
// Test Doubles
// =============================================================================

const VERIFY_TOKEN: &str = "test-verify-token";

/// How the fake completion service answers
#[derive(Clone, Copy)]
enum Completion {
    Content(&'static str),
    Empty,
    Fail,
}

/// Records every prompt it is asked to complete
struct RecordingInference {
    model: Option<String>,
    completion: Completion,
    prompts: Mutex<Vec<String>>,
}

impl RecordingInference {
    fn new(completion: Completion) -> Self {
        Self {
            model: Some("gpt-4o".to_string()),
            completion,
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn without_deployment() -> Self {
        Self {
            model: None,
            ..Self::new(Completion::Content("unused"))
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferencePort for RecordingInference {
    async fn generate(&self, message: &str) -> Result<InferenceResult, ApplicationError> {
        self.prompts.lock().unwrap().push(message.to_string());
        let content = match self.completion {
            Completion::Content(text) => Some(text.to_string()),
            Completion::Empty => None,
            Completion::Fail => {
                return Err(ApplicationError::Inference("HTTP 500".to_string()));
            },
        };
        Ok(InferenceResult {
            content,
            model: "gpt-4o".to_string(),
            tokens_used: Some(12),
            latency_ms: 5,
        })
    }

    fn current_model(&self) -> Option<String> {
        self.model.clone()
    }
}

/// How the fake Graph API answers
#[derive(Clone, Copy)]
enum Delivery {
    Status(u16),
    Rejected(u16),
    Unreachable,
}

/// Records every outbound message
struct RecordingMessenger {
    delivery: Delivery,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMessenger {
    fn new(delivery: Delivery) -> Self {
        Self {
            delivery,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessengerPort for RecordingMessenger {
    async fn send_text(&self, message: &OutboundMessage) -> Result<u16, ApplicationError> {
        self.sent
            .lock()
            .unwrap()
            .push((message.recipient.to_string(), message.text.clone()));
        match self.delivery {
            Delivery::Status(status) => Ok(status),
            Delivery::Rejected(status) => Err(ApplicationError::Rejected { status }),
            Delivery::Unreachable => Err(ApplicationError::ExternalService(
                "connection refused".to_string(),
            )),
        }
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

struct Harness {
    server: TestServer,
    inference: Arc<RecordingInference>,
    messenger: Arc<RecordingMessenger>,
}

fn test_config() -> AppConfig {
    AppConfig {
        whatsapp: WhatsAppConfig {
            verify_token: Some(VERIFY_TOKEN.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn harness_with(
    config: AppConfig,
    inference: RecordingInference,
    messenger: RecordingMessenger,
) -> Harness {
    let inference = Arc::new(inference);
    let messenger = Arc::new(messenger);

    let state = AppState {
        reply_service: Arc::new(ReplyService::new(
            Arc::clone(&inference) as Arc<dyn InferencePort>
        )),
        dispatcher: Arc::new(MessageDispatcher::new(
            Arc::clone(&messenger) as Arc<dyn MessengerPort>
        )),
        config: Arc::new(config),
    };

    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    Harness {
        server,
        inference,
        messenger,
    }
}

fn harness(completion: Completion, delivery: Delivery) -> Harness {
    harness_with(
        test_config(),
        RecordingInference::new(completion),
        RecordingMessenger::new(delivery),
    )
}

fn default_harness() -> Harness {
    harness(Completion::Content("Hi! How can I help?"), Delivery::Status(200))
}

fn text_message_payload(from: &str, body: &str) -> serde_json::Value {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "WHATSAPP_BUSINESS_ACCOUNT_ID",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "metadata": {
                        "display_phone_number": "15550000000",
                        "phone_number_id": "123456789"
                    },
                    "contacts": [{"profile": {"name": "Test User"}, "wa_id": from}],
                    "messages": [{
                        "from": from,
                        "id": "wamid.TEST",
                        "timestamp": "1700000000",
                        "type": "text",
                        "text": {"body": body}
                    }]
                }
            }]
        }]
    })
}

fn status_payload() -> serde_json::Value {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "WHATSAPP_BUSINESS_ACCOUNT_ID",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "statuses": [{
                        "id": "wamid.SENT",
                        "status": "delivered",
                        "timestamp": "1700000001",
                        "recipient_id": "15551234567"
                    }]
                }
            }]
        }]
    })
}

// =============================================================================
// Root & Health
// =============================================================================

#[tokio::test]
async fn root_reports_running() {
    let h = default_harness();

    let response = h.server.get("/").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"message": "WhatsApp relay is running"}));
}

#[tokio::test]
async fn health_is_ok() {
    let h = default_harness();

    let response = h.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn health_is_ok_without_deployment() {
    let h = harness_with(
        AppConfig::default(),
        RecordingInference::without_deployment(),
        RecordingMessenger::new(Delivery::Status(200)),
    );

    let response = h.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Webhook Verification (GET)
// =============================================================================

#[tokio::test]
async fn verification_echoes_challenge() {
    let h = default_harness();

    let response = h
        .server
        .get("/webhook")
        .add_query_param("hub.mode", "subscribe")
        .add_query_param("hub.verify_token", VERIFY_TOKEN)
        .add_query_param("hub.challenge", "123")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "123");
    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn verification_echoes_non_numeric_challenge_verbatim() {
    let h = default_harness();

    let response = h
        .server
        .get("/webhook")
        .add_query_param("hub.mode", "subscribe")
        .add_query_param("hub.verify_token", VERIFY_TOKEN)
        .add_query_param("hub.challenge", "abc-XYZ_987")
        .await;

    response.assert_status_ok();
    assert_eq!(response.text(), "abc-XYZ_987");
}

#[tokio::test]
async fn verification_with_wrong_token_is_forbidden() {
    let h = default_harness();

    let response = h
        .server
        .get("/webhook")
        .add_query_param("hub.mode", "subscribe")
        .add_query_param("hub.verify_token", "wrong-token")
        .add_query_param("hub.challenge", "123")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.text(), "Verification failed");
}

#[tokio::test]
async fn verification_with_wrong_mode_is_forbidden() {
    let h = default_harness();

    let response = h
        .server
        .get("/webhook")
        .add_query_param("hub.mode", "unsubscribe")
        .add_query_param("hub.verify_token", VERIFY_TOKEN)
        .add_query_param("hub.challenge", "123")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.text(), "Verification failed");
}

#[tokio::test]
async fn verification_without_parameters_is_forbidden() {
    let h = default_harness();

    let response = h.server.get("/webhook").await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.text(), "Verification failed");
}

#[tokio::test]
async fn verification_without_configured_token_is_forbidden() {
    let h = harness_with(
        AppConfig::default(),
        RecordingInference::new(Completion::Content("unused")),
        RecordingMessenger::new(Delivery::Status(200)),
    );

    let response = h
        .server
        .get("/webhook")
        .add_query_param("hub.mode", "subscribe")
        .add_query_param("hub.verify_token", "")
        .add_query_param("hub.challenge", "123")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

// =============================================================================
// Webhook Events (POST)
// =============================================================================

#[tokio::test]
async fn text_message_is_relayed() {
    let h = default_harness();

    let response = h
        .server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "hello"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"status": "ok"}));

    assert_eq!(h.inference.prompts(), vec!["hello".to_string()]);
    assert_eq!(
        h.messenger.sent(),
        vec![("15551234567".to_string(), "Hi! How can I help?".to_string())]
    );
}

#[tokio::test]
async fn whitespace_message_is_relayed() {
    let h = default_harness();

    let response = h
        .server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "   "))
        .await;

    response.assert_status_ok();
    assert_eq!(h.inference.prompts(), vec!["   ".to_string()]);
    assert_eq!(h.messenger.sent().len(), 1);
}

#[tokio::test]
async fn rejected_dispatch_still_acknowledges() {
    let h = harness(Completion::Content("reply"), Delivery::Rejected(401));

    let response = h
        .server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "hello"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(h.messenger.sent().len(), 1);
}

#[tokio::test]
async fn unreachable_messenger_still_acknowledges() {
    let h = harness(Completion::Content("reply"), Delivery::Unreachable);

    let response = h
        .server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "hello"))
        .await;

    response.assert_status_ok();
    assert_eq!(h.messenger.sent().len(), 1);
}

#[tokio::test]
async fn completion_failure_sends_fallback() {
    let h = harness(Completion::Fail, Delivery::Status(200));

    let response = h
        .server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "hello"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        h.messenger.sent(),
        vec![("15551234567".to_string(), REPLY_FAILED.to_string())]
    );
}

#[tokio::test]
async fn empty_completion_sends_fallback() {
    let h = harness(Completion::Empty, Delivery::Status(200));

    h.server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "hello"))
        .await
        .assert_status_ok();

    assert_eq!(
        h.messenger.sent(),
        vec![("15551234567".to_string(), REPLY_EMPTY.to_string())]
    );
}

#[tokio::test]
async fn missing_deployment_sends_notice_without_completion_call() {
    let h = harness_with(
        test_config(),
        RecordingInference::without_deployment(),
        RecordingMessenger::new(Delivery::Status(200)),
    );

    h.server
        .post("/webhook")
        .json(&text_message_payload("15551234567", "hello"))
        .await
        .assert_status_ok();

    assert!(h.inference.prompts().is_empty());
    assert_eq!(
        h.messenger.sent(),
        vec![("15551234567".to_string(), REPLY_NOT_CONFIGURED.to_string())]
    );
}

#[tokio::test]
async fn status_event_is_acknowledged_without_calls() {
    let h = default_harness();

    let response = h.server.post("/webhook").json(&status_payload()).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"status": "ok"}));
    assert!(h.inference.prompts().is_empty());
    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn unrecognized_event_is_acknowledged_without_calls() {
    let h = default_harness();

    let response = h
        .server
        .post("/webhook")
        .json(&json!({"entry": [{"changes": [{"value": {"messaging_product": "whatsapp"}}]}]}))
        .await;

    response.assert_status_ok();
    assert!(h.inference.prompts().is_empty());
    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn malformed_body_is_acknowledged_without_calls() {
    let h = default_harness();

    let response = h.server.post("/webhook").text("this is not json").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"status": "ok"}));
    assert!(h.inference.prompts().is_empty());
    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn empty_entry_list_is_acknowledged_without_calls() {
    let h = default_harness();

    let response = h.server.post("/webhook").json(&json!({"entry": []})).await;

    response.assert_status_ok();
    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn non_text_message_is_acknowledged_without_calls() {
    let h = default_harness();

    let payload = json!({
        "entry": [{"changes": [{"value": {
            "messages": [{
                "from": "15551234567",
                "id": "wamid.IMG",
                "type": "image",
                "image": {"id": "media-1", "mime_type": "image/jpeg"}
            }]
        }}]}]
    });
    let response = h.server.post("/webhook").json(&payload).await;

    response.assert_status_ok();
    assert!(h.inference.prompts().is_empty());
    assert!(h.messenger.sent().is_empty());
}

#[tokio::test]
async fn oversized_body_is_acknowledged_without_calls() {
    let config = AppConfig {
        server: ServerConfig {
            max_body_bytes: 64,
            ..Default::default()
        },
        ..test_config()
    };
    let h = harness_with(
        config,
        RecordingInference::new(Completion::Content("reply")),
        RecordingMessenger::new(Delivery::Status(200)),
    );

    let response = h
        .server
        .post("/webhook")
        .json(&text_message_payload("15551234567", &"x".repeat(256)))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({"status": "ok"}));
    assert!(h.inference.prompts().is_empty());
    assert!(h.messenger.sent().is_empty());
}

// =============================================================================
// Request ID
// =============================================================================

#[tokio::test]
async fn responses_carry_generated_request_id() {
    let h = default_harness();

    let response = h.server.get("/health").await;

    let header = response.header("x-request-id");
    let id = Uuid::parse_str(header.to_str().unwrap()).unwrap();
    assert_eq!(id.get_version_num(), 7);
}

#[tokio::test]
async fn supplied_request_id_is_propagated() {
    let h = default_harness();
    let supplied = "0190b6c2-6f1e-7a3b-9c4d-123456789abc";

    let response = h
        .server
        .post("/webhook")
        .add_header("x-request-id", supplied)
        .json(&status_payload())
        .await;

    assert_eq!(response.header("x-request-id").to_str().unwrap(), supplied);
}

#[tokio::test]
async fn forbidden_responses_carry_request_id() {
    let h = default_harness();

    let response = h.server.get("/webhook").await;

    response.assert_status(StatusCode::FORBIDDEN);
    let header = response.header("x-request-id");
    assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

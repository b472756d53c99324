//! Integration tests for the Tally API.
//!
//! Each test builds a fresh router over an in-memory database and drives
//! it with `tower::ServiceExt::oneshot`, covering the chat pipeline end to
//! end from HTTP request to reply text.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tally_api::handlers::{ChatReply, HealthResponse};
use tally_api::{create_router, AppState};
use tally_chat::{ChatDispatcher, LedgerOps};
use tally_core::TallyConfig;
use tally_nlu::{IntentClassifier, UtteranceCorpus};
use tally_storage::{BillRepository, CustomerRepository, Database};

// =============================================================================
// Helpers
// =============================================================================

/// Create a fresh AppState with an in-memory DB and a trained classifier.
fn make_state() -> AppState {
    let config = TallyConfig::default();
    let db = Arc::new(Database::in_memory().unwrap());
    let ops = LedgerOps::new(
        CustomerRepository::new(Arc::clone(&db)),
        BillRepository::new(db),
        config.chat.bill_list_limit,
    );
    let classifier = Arc::new(IntentClassifier::train(&UtteranceCorpus::builtin()));
    let dispatcher = ChatDispatcher::new(
        classifier,
        ops,
        config.nlu.min_confidence,
        config.chat.max_message_length,
    );
    AppState::new(config, dispatcher)
}

fn make_app() -> axum::Router {
    create_router(make_state())
}

/// Build a POST /chat request with the given message.
fn chat_request(message: &str) -> Request<Body> {
    let body = serde_json::json!({ "message": message }).to_string();
    Request::post("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Read full response body bytes.
async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

/// Send one chat message and return the reply text, asserting 200.
async fn chat(app: &axum::Router, message: &str) -> String {
    let resp = app.clone().oneshot(chat_request(message)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let reply: ChatReply = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    reply.message
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = make_app();
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
}

// =============================================================================
// Chat scenarios
// =============================================================================

#[tokio::test]
async fn test_greeting() {
    let app = make_app();
    let reply = chat(&app, "Hello").await;
    assert_eq!(reply, "I'm here to assist you. How can I help?");
}

#[tokio::test]
async fn test_add_bill_then_repeat_reuses_customer() {
    let app = make_app();

    let reply = chat(&app, "Add a bill for John Doe, 150.50, Paid").await;
    assert_eq!(reply, "New bill added successfully! Bill ID: 1");

    let reply = chat(&app, "Add a bill for John Doe, 150.50, Paid").await;
    assert_eq!(reply, "New bill added successfully! Bill ID: 2");

    // Both bills hang off the single customer row.
    let details = chat(&app, "get customer details of John Doe").await;
    assert!(details.contains("<td>1</td>"));
}

#[tokio::test]
async fn test_display_bills() {
    let app = make_app();
    chat(&app, "Add a bill for John Doe, 150.50, Paid").await;
    chat(&app, "Add a bill for John Doe, 200, Pending").await;

    let reply = chat(&app, "Display Bills").await;
    assert!(reply.starts_with("Here are your latest bills:<br>"));
    assert_eq!(reply.matches("<td>John Doe</td>").count(), 2);
}

#[tokio::test]
async fn test_display_bills_empty() {
    let app = make_app();
    assert_eq!(chat(&app, "Display Bills").await, "No bills found.");
}

#[tokio::test]
async fn test_get_customer_phone_not_provided() {
    let app = make_app();
    chat(&app, "Add a bill for John Doe, 150.50, Paid").await;

    let reply = chat(&app, "get customer details of John Doe").await;
    assert!(reply.starts_with("Here are the customer details:<br>"));
    assert!(reply.contains("<td>John Doe</td>"));
    assert!(reply.contains("<td>not provided</td>"));
}

#[tokio::test]
async fn test_update_phone_unknown_customer() {
    let app = make_app();
    let reply = chat(&app, "Update phone for Jane Roe, 9876543210").await;
    assert_eq!(reply, "Customer with name \"Jane Roe\" not found.");
}

#[tokio::test]
async fn test_add_customer_update_phone_roundtrip() {
    let app = make_app();

    let reply = chat(&app, "Add a customer Jane Roe, 1111111111").await;
    assert_eq!(reply, "New customer added successfully! Customer Name: Jane Roe");

    let reply = chat(&app, "Update phone for Jane Roe, 9876543210").await;
    assert_eq!(reply, "Phone number updated successfully for Jane Roe!");

    let details = chat(&app, "get customer details of jane roe").await;
    assert!(details.contains("<td>9876543210</td>"));
}

#[tokio::test]
async fn test_unrecognized_message() {
    let app = make_app();
    let reply = chat(&app, "asdkjasd").await;
    assert_eq!(
        reply,
        "Sorry, I didn't understand that. Can you please clarify your request?"
    );
}

// =============================================================================
// Error paths
// =============================================================================

#[tokio::test]
async fn test_empty_message_is_bad_request() {
    let app = make_app();
    let resp = app.oneshot(chat_request("   ")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_over_long_message_is_bad_request() {
    let app = make_app();
    let long = "a".repeat(5000);
    let resp = app.oneshot(chat_request(&long)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let app = make_app();
    let resp = app
        .oneshot(
            Request::post("/chat")
                .header("content-type", "application/json")
                .body(Body::from("{\"not_message\": 1}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = make_app();
    let resp = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

//! # Integration Tests for herald-api
//!
//! Drives the webhook router with tower `oneshot` requests and asserts on
//! the recorded outbound traffic, the store, and the audit log — no
//! network, no database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use herald_api::{AppState, RecordingOutbound};
use herald_core::{BotConfig, Registrant, UserId, UserProfile};
use herald_service::{BotService, MockSender};
use herald_store::{MemoryAuditSink, MemoryStore, RegistrantStore};

const ADMIN: i64 = 9000;

struct World {
    store: Arc<MemoryStore>,
    audit: Arc<MemoryAuditSink>,
    sender: Arc<MockSender>,
    outbound: Arc<RecordingOutbound>,
    app: axum::Router,
}

fn world() -> World {
    let store = Arc::new(MemoryStore::new());
    let audit = Arc::new(MemoryAuditSink::new());
    let sender = Arc::new(MockSender::new());
    let outbound = Arc::new(RecordingOutbound::new());

    let service = Arc::new(BotService::new(
        BotConfig::new(ADMIN).with_admin_contact("helpdesk"),
        store.clone(),
        audit.clone(),
        sender.clone(),
    ));
    let app = herald_api::app(AppState::new(service, outbound.clone(), None));

    World {
        store,
        audit,
        sender,
        outbound,
        app,
    }
}

async fn post_update(app: axum::Router, body: serde_json::Value) -> StatusCode {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/bot")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    response.status()
}

fn message_update(from_id: i64, username: Option<&str>, text: &str) -> serde_json::Value {
    let mut from = serde_json::json!({"id": from_id, "first_name": "Test"});
    if let Some(username) = username {
        from["username"] = serde_json::json!(username);
    }
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 100,
            "from": from,
            "chat": {"id": from_id},
            "text": text
        }
    })
}

fn callback_update(from_id: i64, data: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb-1",
            "from": {"id": from_id, "first_name": "Test"},
            "message": {"message_id": 100, "chat": {"id": from_id}},
            "data": data
        }
    })
}

async fn seed(store: &MemoryStore, ids: &[i64]) {
    for &id in ids {
        store
            .insert(&Registrant::from_profile(&UserProfile::new(
                id,
                None,
                Some("Seed".to_string()),
            )))
            .await
            .expect("seed registrant");
    }
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn liveness_probe() {
    let w = world();
    let response = w
        .app
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.expect("body").to_bytes();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn readiness_probe_without_database() {
    let w = world();
    let response = w
        .app
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Webhook info -------------------------------------------------------------

#[tokio::test]
async fn get_webhook_returns_info_payload() {
    let w = world();
    let response = w
        .app
        .oneshot(
            Request::builder()
                .uri("/api/bot")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.expect("body").to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
    assert!(json["message"].as_str().expect("message").contains("webhook"));
}

// -- Registration flow --------------------------------------------------------

#[tokio::test]
async fn start_sends_prompt_with_tagged_buttons() {
    let w = world();
    let status = post_update(w.app, message_update(42, Some("ada"), "/start")).await;
    assert_eq!(status, StatusCode::OK);

    let sends = w.outbound.sends();
    assert_eq!(sends.len(), 1);
    let (chat_id, reply) = &sends[0];
    assert_eq!(*chat_id, 42);
    assert_eq!(reply.actions.len(), 3); // confirm, decline, contact admin
    assert!(reply.text.contains("not yet registered"));

    // The prompt alone registers nothing.
    assert_eq!(w.store.count().await.expect("count"), 0);
}

#[tokio::test]
async fn confirm_callback_registers_and_edits_prompt() {
    let w = world();
    let status = post_update(w.app, callback_update(42, "register_yes:42")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(w.outbound.acks(), vec!["cb-1".to_string()]);
    let edits = w.outbound.edits();
    assert_eq!(edits.len(), 1);
    let (chat_id, message_id, reply) = &edits[0];
    assert_eq!((*chat_id, *message_id), (42, 100));
    assert!(reply.text.contains("Thanks for registering"));

    assert!(w.store.exists(UserId::new(42)).await.expect("exists"));
}

#[tokio::test]
async fn foreign_callback_is_rejected_without_mutation() {
    let w = world();
    // Token issued for 42, pressed by 43.
    let status = post_update(w.app, callback_update(43, "register_yes:42")).await;
    assert_eq!(status, StatusCode::OK);

    let edits = w.outbound.edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].2.text, "This registration prompt is not for you.");
    assert_eq!(w.store.count().await.expect("count"), 0);
}

#[tokio::test]
async fn malformed_callback_data_is_acknowledged_and_dropped() {
    let w = world();
    let status = post_update(w.app, callback_update(42, "register_maybe:42")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(w.outbound.acks().len(), 1);
    assert!(w.outbound.edits().is_empty());
    assert!(w.outbound.sends().is_empty());
}

// -- Admin commands -----------------------------------------------------------

#[tokio::test]
async fn admin_count_replies_and_audits() {
    let w = world();
    seed(&w.store, &[1, 2]).await;

    post_update(w.app, message_update(ADMIN, Some("boss"), "/count")).await;

    let sends = w.outbound.sends();
    assert_eq!(sends[0].1.text, "Currently, 2 users are registered.");
    assert_eq!(w.audit.entries().len(), 1);
}

#[tokio::test]
async fn non_admin_count_is_unauthorized_with_no_audit() {
    let w = world();
    post_update(w.app, message_update(42, None, "/count")).await;

    let sends = w.outbound.sends();
    assert_eq!(
        sends[0].1.text,
        "Unauthorized access. This command is for admins only."
    );
    assert!(w.audit.entries().is_empty());
}

#[tokio::test]
async fn admin_notify_broadcasts_and_reports() {
    let w = world();
    seed(&w.store, &[1, 2, 3]).await;
    w.sender.fail_for([UserId::new(2)]);

    post_update(
        w.app,
        message_update(ADMIN, Some("boss"), "/notify The app is live!"),
    )
    .await;

    let sends = w.outbound.sends();
    assert_eq!(
        sends[0].1.text,
        "Broadcast complete! Sent to 2 users. Failed for 1 users."
    );

    // Broadcast deliveries went through the sender, not the webhook reply path.
    let delivered: Vec<i64> = w.sender.sent().iter().map(|(id, _)| id.as_i64()).collect();
    assert_eq!(delivered.len(), 2);
    assert!(delivered.contains(&1) && delivered.contains(&3));
}

#[tokio::test]
async fn command_with_bot_mention_is_routed() {
    let w = world();
    post_update(w.app, message_update(ADMIN, None, "/count@herald_bot")).await;
    let sends = w.outbound.sends();
    assert_eq!(sends[0].1.text, "Currently, 0 users are registered.");
}

// -- Plain text ---------------------------------------------------------------

#[tokio::test]
async fn plain_text_gets_redirect() {
    let w = world();
    post_update(w.app, message_update(42, None, "hello bot")).await;

    let sends = w.outbound.sends();
    assert_eq!(
        sends[0].1.text,
        "I'm a registration bot! Please use commands like /start or /help."
    );
}

#[tokio::test]
async fn help_shows_admin_section_only_to_admin() {
    let w = world();
    post_update(w.app.clone(), message_update(42, None, "/help")).await;
    post_update(w.app, message_update(ADMIN, None, "/help")).await;

    let sends = w.outbound.sends();
    assert!(!sends[0].1.text.contains("Admin Commands"));
    assert!(sends[1].1.text.contains("Admin Commands"));
}

// -- Update shapes ------------------------------------------------------------

#[tokio::test]
async fn unknown_update_shape_is_acknowledged() {
    let w = world();
    let status = post_update(w.app, serde_json::json!({"update_id": 99})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(w.outbound.sends().is_empty());
}

#[tokio::test]
async fn unknown_command_is_ignored() {
    let w = world();
    post_update(w.app, message_update(42, None, "/frobnicate")).await;
    assert!(w.outbound.sends().is_empty());
}

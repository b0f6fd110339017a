//! Integration tests for the intake HTTP API.
//!
//! Each test spins up the full Axum app on a random port and drives it with
//! reqwest, exercising the real JSON contract.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use broker_intake::config::ServerConfig;
use broker_intake::intake::{DialogueEngine, InMemorySessionStore, IntakeService, SessionStore};
use broker_intake::web;

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Start the app on a random port, return (base URL, store).
async fn start_server() -> (String, Arc<InMemorySessionStore>) {
    let store = InMemorySessionStore::new();
    let service = Arc::new(IntakeService::new(
        Arc::clone(&store) as Arc<dyn SessionStore>,
        DialogueEngine::default(),
    ));
    let static_dir = tempfile::tempdir().unwrap().keep();
    let config = ServerConfig {
        static_dir,
        ..ServerConfig::default()
    };
    let app = web::app(&config, service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{port}"), store)
}

async fn chat(client: &reqwest::Client, base: &str, session_id: &str, message: &str) -> Value {
    let resp = client
        .post(format!("{base}/chat"))
        .json(&json!({ "session_id": session_id, "message": message }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn full_intake_conversation() {
    timeout(TEST_TIMEOUT, async {
        let (base, store) = start_server().await;
        let client = reqwest::Client::new();

        let r = chat(&client, &base, "conv", "start").await;
        assert_eq!(r["escalation"], false);
        assert_eq!(r["chips"], json!(["I'm Alex", "My name is Sam"]));

        let r = chat(&client, &base, "conv", "I'm Alex").await;
        assert_eq!(r["reply"], "Nice to meet you, Alex! What brings you in today?");
        assert_eq!(
            r["chips"],
            json!(["First home", "Refinance", "Investor", "Upgrade", "Construction"])
        );

        let r = chat(&client, &base, "conv", "First home").await;
        assert_eq!(r["reply"], "Great. When are you hoping to move ahead?");

        let r = chat(&client, &base, "conv", "Planning (3–6 months)").await;
        let reply = r["reply"].as_str().unwrap();
        assert!(reply.contains("Alex"));
        assert!(reply.contains("First home"));
        assert!(reply.contains("Planning (3–6 months)"));
        assert!(reply.contains("Savings history & deposit amount"));
        assert_eq!(
            r["chips"],
            json!(["What documents do I need?", "What's the process?", "Book a broker call"])
        );

        let session = store.get("conv").await.unwrap().unwrap();
        assert_eq!(session.history.len(), 5);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn advice_request_escalates_before_name() {
    timeout(TEST_TIMEOUT, async {
        let (base, store) = start_server().await;
        let client = reqwest::Client::new();

        let r = chat(&client, &base, "esc", "Which lender has the best loan?").await;
        assert_eq!(r["escalation"], true);
        assert_eq!(r["chips"], json!(["Book a broker call", "Not now"]));

        let session = store.get("esc").await.unwrap().unwrap();
        assert!(session.name.is_none());
        assert_eq!(session.history.len(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn prime_then_chat_skips_goal() {
    timeout(TEST_TIMEOUT, async {
        let (base, _store) = start_server().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/prime"))
            .json(&json!({ "session_id": "primed", "goal": "Refinance" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "ok": true }));

        let r = chat(&client, &base, "primed", "My name is Sam").await;
        assert_eq!(r["reply"], "Great. When are you hoping to move ahead?");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn health_is_stable() {
    timeout(TEST_TIMEOUT, async {
        let (base, store) = start_server().await;
        let client = reqwest::Client::new();

        for _ in 0..3 {
            let resp = client.get(format!("{base}/health")).send().await.unwrap();
            assert_eq!(resp.status(), 200);
            let body: Value = resp.json().await.unwrap();
            assert_eq!(body, json!({ "ok": true }));
        }
        assert!(store.is_empty().await);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn missing_session_id_is_a_validation_error() {
    timeout(TEST_TIMEOUT, async {
        let (base, store) = start_server().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/chat"))
            .json(&json!({ "message": "hi" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 422);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "validation_failed");
        assert!(store.is_empty().await);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn root_reports_status_without_index() {
    timeout(TEST_TIMEOUT, async {
        let (base, _store) = start_server().await;
        let body: Value = reqwest::get(format!("{base}/"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "Broker intake chatbot running");
    })
    .await
    .expect("test timed out");
}

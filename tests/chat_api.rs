//! End-to-end tests against a running instance of the service.
//!
//! Each test binds the app on an ephemeral port with an in-memory database
//! and drives it over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;

use emd_chatbot::catalog::{Answer, COMM_ERROR_TEXT, SERVER_ERROR_TEXT};
use emd_chatbot::engine::{ChatEngine, EngineMode};
use emd_chatbot::fallback::{FallbackMode, FallbackSelector};
use emd_chatbot::rasa::RasaClient;
use emd_chatbot::server::{self, AppState};
use emd_chatbot::store::{Hospital, Medicine, Store};

/// Spawn the service with an in-memory store. Returns the base URL and a
/// handle to the store for assertions.
async fn spawn_app(mode: EngineMode, rasa_url: &str) -> (String, Arc<Store>) {
    let store = Arc::new(Store::in_memory().unwrap());
    let rasa = RasaClient::new(rasa_url, Duration::from_millis(800));
    let fallback = FallbackSelector::new(FallbackMode::Keyword);
    let engine = ChatEngine::new(mode, rasa, fallback).with_store(store.clone());

    let state = Arc::new(AppState { engine, store: store.clone() });
    let app = server::app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), store)
}

/// A stand-in NLU webhook that always answers with the given JSON body.
async fn spawn_fake_rasa(reply: serde_json::Value) -> String {
    let app = Router::new().route(
        "/webhooks/rest/webhook",
        post(move || {
            let reply = reply.clone();
            async move { Json(reply) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// A stand-in NLU webhook answering with an arbitrary status and raw body.
async fn spawn_raw_rasa(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        "/webhooks/rest/webhook",
        post(move || async move {
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn chat(base: &str, message: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/chat"))
        .json(&serde_json::json!({ "message": message }))
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_fee_question_answered_locally() {
    // Rules mode with the NLU pointed at a dead port: the fee rule must
    // still answer, remote availability is irrelevant.
    let (base, _) = spawn_app(EngineMode::Rules, "http://127.0.0.1:9").await;

    let (status, body) = chat(&base, "шимтгэлийн хэмжээ хэд вэ?").await;
    assert_eq!(status, 200);
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("13200"));
    assert!(text.contains("15840"));
}

#[tokio::test]
async fn test_empty_message_gets_fixed_apology() {
    let (base, _) = spawn_app(EngineMode::Rules, "http://127.0.0.1:9").await;

    let (status, body) = chat(&base, "").await;
    assert_eq!(status, 200);
    assert_eq!(
        body["text"].as_str().unwrap(),
        "Уучлаарай, таны мессежийг хүлээн авах боломжгүй байна."
    );
}

#[tokio::test]
async fn test_unreachable_nlu_falls_back_to_greeting() {
    let (base, _) = spawn_app(EngineMode::Remote, "http://127.0.0.1:9").await;

    let (status, body) = chat(&base, "сайн байна уу").await;
    assert_eq!(status, 200);
    assert_eq!(body["text"].as_str().unwrap(), Answer::Greeting.text());
}

#[tokio::test]
async fn test_remote_reply_text_passes_through() {
    let rasa_base = spawn_fake_rasa(serde_json::json!([
        { "recipient_id": "user", "text": "Би Rasa-гаас ирсэн хариу." }
    ]))
    .await;
    let (base, _) = spawn_app(EngineMode::Remote, &rasa_base).await;

    let (status, body) = chat(&base, "ямар нэг асуулт").await;
    assert_eq!(status, 200);
    assert_eq!(body["text"].as_str().unwrap(), "Би Rasa-гаас ирсэн хариу.");
}

#[tokio::test]
async fn test_remote_empty_reply_array_yields_cannot_reply() {
    let rasa_base = spawn_fake_rasa(serde_json::json!([])).await;
    let (base, _) = spawn_app(EngineMode::Remote, &rasa_base).await;

    let (_, body) = chat(&base, "асуулт").await;
    assert_eq!(
        body["text"].as_str().unwrap(),
        "Уучлаарай, би хариу өгөх боломжгүй байна."
    );
}

#[tokio::test]
async fn test_remote_custom_payload_is_flattened_to_json_text() {
    let rasa_base = spawn_fake_rasa(serde_json::json!([
        { "recipient_id": "user", "custom": { "topic": "fee", "amount": 15840 } }
    ]))
    .await;
    let (base, _) = spawn_app(EngineMode::Remote, &rasa_base).await;

    let (status, body) = chat(&base, "шимтгэл").await;
    assert_eq!(status, 200);
    // The structured payload comes back as its JSON text.
    let text = body["text"].as_str().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(parsed, serde_json::json!({ "topic": "fee", "amount": 15840 }));
}

#[tokio::test]
async fn test_remote_error_status_yields_canned_server_error_text() {
    let rasa_base =
        spawn_raw_rasa(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "boom"}"#).await;
    let (base, _) = spawn_app(EngineMode::Remote, &rasa_base).await;

    let (status, body) = chat(&base, "асуулт").await;
    assert_eq!(status, 200);
    assert_eq!(body["text"].as_str().unwrap(), SERVER_ERROR_TEXT);
}

#[tokio::test]
async fn test_remote_malformed_payload_yields_canned_comm_error_text() {
    // A 200 whose body is not the expected reply array.
    let rasa_base = spawn_raw_rasa(StatusCode::OK, r#"{"not": "an array"}"#).await;
    let (base, _) = spawn_app(EngineMode::Remote, &rasa_base).await;

    let (status, body) = chat(&base, "асуулт").await;
    assert_eq!(status, 200);
    assert_eq!(body["text"].as_str().unwrap(), COMM_ERROR_TEXT);
}

#[tokio::test]
async fn test_unmatched_question_is_logged_rules_mode() {
    let (base, store) = spawn_app(EngineMode::Rules, "http://127.0.0.1:9").await;

    let (_, body) = chat(&base, "сансрын нисгэгч болох вэ").await;
    assert_eq!(body["text"].as_str().unwrap(), Answer::General.text());
    assert_eq!(store.unanswered_count().unwrap(), 1);
}

#[tokio::test]
async fn test_hospitals_route() {
    let (base, store) = spawn_app(EngineMode::Rules, "http://127.0.0.1:9").await;
    store
        .insert_hospital(&Hospital {
            name: "УНТЭ".to_string(),
            city: "Улаанбаатар".to_string(),
            insurance_contract: true,
        })
        .unwrap();

    let response = reqwest::get(format!("{base}/api/hospitals")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "УНТЭ");
    assert_eq!(body[0]["insurance_contract"], true);
}

#[tokio::test]
async fn test_medicines_route_with_filters() {
    let (base, store) = spawn_app(EngineMode::Rules, "http://127.0.0.1:9").await;
    store
        .insert_medicine(&Medicine {
            icd10_code: "J06".to_string(),
            icd10_name: "Амьсгалын замын цочмог халдвар".to_string(),
            tablet_id: Some(3),
            tablet_name_mon: "Парацетамол".to_string(),
            tablet_name_sales: "Paracetamol".to_string(),
            unit_price: 500.0,
            unit_discount: 250.0,
        })
        .unwrap();

    let response = reqwest::get(format!("{base}/api/medicines?icd10_code=J06")).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["tablet_name_sales"], "Paracetamol");

    let response = reqwest::get(format!("{base}/api/medicines?icd10_code=нет")).await.unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.as_array().unwrap().is_empty());

    // Empty parameters mean "no filter", as in the original service.
    let response = reqwest::get(format!("{base}/api/medicines?icd10_code=&tablet_name="))
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_unanswered_route() {
    let (base, store) = spawn_app(EngineMode::Rules, "http://127.0.0.1:9").await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/save-unanswered"))
        .json(&serde_json::json!({ "question": "яагаад вэ" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(store.unanswered_count().unwrap(), 1);

    let response = client
        .post(format!("{base}/api/save-unanswered"))
        .json(&serde_json::json!({ "question": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

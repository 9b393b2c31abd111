//! HTTP surface: the chat endpoint plus the hospital/medicine lookup and
//! unanswered-question routes.
//!
//! `/chat` always answers 200 with a text body; classification problems are
//! resolved inside the engine. Only the lookup routes can fail outward, and
//! they do so with a Mongolian error body and a 500.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::engine::ChatEngine;
use crate::store::Store;

pub struct AppState {
    pub engine: ChatEngine,
    pub store: Arc<Store>,
}

/// Build the router. CORS is permissive: the original service is called
/// from a browser frontend on another origin.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/api/hospitals", get(hospitals))
        .route("/api/medicines", get(medicines))
        .route("/api/save-unanswered", post(save_unanswered))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    text: String,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    debug!("User message: {:?}", request.message);
    let text = state.engine.respond(&request.message).await;
    Json(ChatResponse { text })
}

fn db_error(context: &str, user_text: &str, e: rusqlite::Error) -> Response {
    error!("{context}: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": user_text })),
    )
        .into_response()
}

async fn hospitals(State(state): State<Arc<AppState>>) -> Response {
    match state.store.hospitals() {
        Ok(hospitals) => Json(hospitals).into_response(),
        Err(e) => db_error(
            "Error fetching hospitals",
            "Эмнэлгийн мэдээлэл авах үед алдаа гарлаа.",
            e,
        ),
    }
}

#[derive(Deserialize)]
struct MedicineQuery {
    icd10_code: Option<String>,
    tablet_name: Option<String>,
}

/// An empty query parameter means "no filter", not "match the empty string".
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

async fn medicines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MedicineQuery>,
) -> Response {
    match state
        .store
        .search_medicines(non_empty(&query.icd10_code), non_empty(&query.tablet_name))
    {
        Ok(medicines) => Json(medicines).into_response(),
        Err(e) => db_error(
            "Error fetching medicines",
            "Эмийн мэдээлэл авах үед алдаа гарлаа.",
            e,
        ),
    }
}

#[derive(Deserialize)]
struct UnansweredRequest {
    #[serde(default)]
    question: String,
}

async fn save_unanswered(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UnansweredRequest>,
) -> Response {
    if request.question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "success": false, "error": "Асуулт хоосон байна." })),
        )
            .into_response();
    }

    match state.store.save_unanswered(&request.question) {
        Ok(()) => Json(serde_json::json!({ "success": true })).into_response(),
        Err(e) => {
            error!("Error saving unanswered question: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "success": false, "error": "Хадгалах үед алдаа гарлаа." })),
            )
                .into_response()
        }
    }
}

/// Resolves when Ctrl+C or SIGTERM arrives, for axum's graceful shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

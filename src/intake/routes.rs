//! REST endpoints for the intake chat.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::engine::ChatReply;
use super::service::{ChatRequest, IntakeService, PrimeRequest, PrimeResponse};
use crate::error::ApiError;

/// Shared state for intake routes.
#[derive(Clone)]
pub struct IntakeRouteState {
    pub service: Arc<IntakeService>,
}

/// POST /prime
///
/// Pre-populates goal and timeline before the first chat turn.
async fn prime(
    State(state): State<IntakeRouteState>,
    body: Result<Json<PrimeRequest>, JsonRejection>,
) -> Result<Json<PrimeResponse>, ApiError> {
    let Json(req) = body?;
    Ok(Json(state.service.prime(req).await?))
}

/// POST /chat
///
/// Runs one turn of the intake conversation.
async fn chat(
    State(state): State<IntakeRouteState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(req) = body?;
    Ok(Json(state.service.chat(req).await?))
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// Build the intake REST routes.
pub fn intake_routes(state: IntakeRouteState) -> Router {
    Router::new()
        .route("/prime", post(prime))
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

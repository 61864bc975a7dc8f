use axum::{extract::State, Json};
use serde_json::{json, Map, Value};

use crate::state::AppState;

const SERVICE_NAME: &str = "Data Academy API";

/// GET /
/// Landing payload with a short persona summary.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let personas: Map<String, Value> = state
        .personas
        .cards()
        .into_iter()
        .map(|card| (card.id.tag().to_string(), Value::from(card.role)))
        .collect();

    Json(json!({
        "message": format!("Welcome to {SERVICE_NAME}"),
        "personas": personas
    }))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /ready
/// Nothing is probed; the only dependency is the completion endpoint, which is configured at startup.
pub async fn ready_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ready": true,
        "ai_service": "configured",
        "model": state.model_name
    }))
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::grading::handlers as grading;
use crate::state::AppState;
use crate::tutor::handlers as tutor;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/ready", get(health::ready_handler))
        // Tutor API
        .route("/api/tutor/chat", post(tutor::handle_chat))
        .route("/api/tutor/hint", post(tutor::handle_hint))
        .route("/api/tutor/personas", get(tutor::handle_personas))
        // Grading API
        .route("/api/grade/submit-code", post(grading::handle_submit_code))
        .with_state(state)
}

//! Axum route handlers for the Tutor API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::personas::{Persona, PersonaCard};
use crate::state::AppState;
use crate::tutor::dialogue::{ChatTurn, HintLevel};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub tutor_persona: Option<Persona>,
    pub context: Option<String>,
    pub chat_history: Option<Vec<ChatTurn>>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub persona: Persona,
    pub message: String,
    pub suggestions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct HintRequest {
    pub challenge_description: String,
    #[serde(default)]
    pub user_code: String,
    pub tutor_persona: Option<Persona>,
    pub hint_level: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HintResponse {
    pub hint: String,
    /// The level actually applied (out-of-range requests report 1).
    pub hint_level: u8,
    pub persona: Persona,
}

#[derive(Debug, Serialize)]
pub struct PersonaCatalog {
    pub personas: Vec<PersonaCard>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/tutor/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = state
        .tutor
        .respond(
            &request.message,
            request.context.as_deref(),
            request.tutor_persona.unwrap_or_default(),
            request.chat_history.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(ChatResponse {
        persona: response.persona,
        message: response.message,
        suggestions: response.suggestions,
    }))
}

/// POST /api/tutor/hint
pub async fn handle_hint(
    State(state): State<AppState>,
    AppJson(request): AppJson<HintRequest>,
) -> Result<Json<HintResponse>, AppError> {
    let persona = request.tutor_persona.unwrap_or_default();
    let level = HintLevel::from_level(request.hint_level.unwrap_or(1));

    let hint = state
        .tutor
        .hint(
            &request.challenge_description,
            &request.user_code,
            persona,
            level,
        )
        .await?;

    Ok(Json(HintResponse {
        hint,
        hint_level: level.level(),
        persona,
    }))
}

/// GET /api/tutor/personas
pub async fn handle_personas(State(state): State<AppState>) -> Json<PersonaCatalog> {
    Json(PersonaCatalog {
        personas: state.personas.cards().into_iter().cloned().collect(),
    })
}

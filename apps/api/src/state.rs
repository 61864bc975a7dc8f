use std::sync::Arc;

use crate::grading::grader::GradingService;
use crate::llm_client::CompletionModel;
use crate::personas::PersonaTable;
use crate::tutor::dialogue::TutorService;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub tutor: TutorService,
    pub grader: GradingService,
    pub personas: Arc<PersonaTable>,
    /// Reported by the readiness probe.
    pub model_name: String,
}

impl AppState {
    pub fn new(model: Arc<dyn CompletionModel>, personas: Arc<PersonaTable>) -> Self {
        Self {
            tutor: TutorService::new(model.clone(), personas.clone()),
            grader: GradingService::new(model.clone()),
            model_name: model.model_name().to_string(),
            personas,
        }
    }
}

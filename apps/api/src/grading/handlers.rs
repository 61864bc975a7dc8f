//! Axum route handlers for the Grading API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extract::AppJson;
use crate::grading::grader::{GradingCriteria, Language, SubmissionContext};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitCodeRequest {
    pub code_snippet: String,
    pub challenge_id: String,
    pub language: Language,
    pub challenge_title: Option<String>,
    pub challenge_description: Option<String>,
    pub expected_behavior: Option<String>,
    pub test_cases: Option<Vec<Value>>,
    pub difficulty: Option<u32>,
    pub passing_score: Option<u32>,
}

impl From<SubmitCodeRequest> for SubmissionContext {
    fn from(req: SubmitCodeRequest) -> Self {
        let mut submission = SubmissionContext::new(req.code_snippet, req.challenge_id, req.language);

        if let Some(title) = req.challenge_title.filter(|t| !t.trim().is_empty()) {
            submission.challenge_title = title;
        }
        if let Some(description) = req.challenge_description {
            submission.challenge_description = description;
        }
        if let Some(expected) = req.expected_behavior {
            submission.expected_behavior = expected;
        }
        if let Some(test_cases) = req.test_cases {
            submission.test_cases = test_cases;
        }
        if let Some(difficulty) = req.difficulty {
            submission.difficulty = difficulty;
        }
        if let Some(passing_score) = req.passing_score {
            submission.passing_score = passing_score;
        }

        submission
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitCodeResponse {
    pub score: u32,
    pub feedback_text: String,
    pub criteria: GradingCriteria,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub passed: bool,
    pub suggestions: Option<Vec<String>>,
}

/// POST /api/grade/submit-code
///
/// Grades the submission; adds improvement suggestions when the score is below 90.
pub async fn handle_submit_code(
    State(state): State<AppState>,
    AppJson(request): AppJson<SubmitCodeRequest>,
) -> Result<Json<SubmitCodeResponse>, AppError> {
    let submission = SubmissionContext::from(request);
    let outcome = state.grader.submit(&submission).await?;
    let result = outcome.result;

    Ok(Json(SubmitCodeResponse {
        score: result.score,
        feedback_text: result.feedback_text,
        criteria: result.criteria,
        strengths: result.strengths,
        improvements: result.improvements,
        passed: result.passed,
        suggestions: outcome.suggestions,
    }))
}

//! Code grading: rubric-scored evaluation of a student submission.
//!
//! Flow: validate submission → rubric prompt + challenge context → JSON-mode
//! completion → strict decode → recompute `passed` → (score < 90) second
//! completion for improvement suggestions → `SubmissionOutcome`.
//!
//! The model's own `passed` flag is never trusted; it is always recomputed here.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::grading::prompts::{
    CHALLENGE_CONTEXT_TEMPLATE, DEFAULT_EXPECTED_BEHAVIOR, GRADING_SYSTEM_PROMPT, NO_TEST_CASES,
    SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM_PROMPT,
};
use crate::grading::suggestions::extract_suggestions;
use crate::llm_client::prompts::{render_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{decode_json, CompletionModel, CompletionRequest, SchemaError};

/// Scores below this trigger the suggestion pass.
pub const SUGGESTION_SCORE_THRESHOLD: u32 = 90;

const DEFAULT_CHALLENGE_TITLE: &str = "Coding Challenge";
const DEFAULT_DIFFICULTY: u32 = 1;
const DEFAULT_PASSING_SCORE: u32 = 70;

const GRADING_TEMPERATURE: f32 = 0.2;
const SUGGESTION_TEMPERATURE: f32 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Sql,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Sql => "sql",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-criterion breakdown. Upper bounds: 40 / 25 / 15 / 20.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingCriteria {
    pub correctness: u32,
    pub efficiency: u32,
    pub style: u32,
    pub business_insight: u32,
}

impl GradingCriteria {
    pub const MAX_CORRECTNESS: u32 = 40;
    pub const MAX_EFFICIENCY: u32 = 25;
    pub const MAX_STYLE: u32 = 15;
    pub const MAX_BUSINESS_INSIGHT: u32 = 20;

    pub fn total(&self) -> u32 {
        self.correctness + self.efficiency + self.style + self.business_insight
    }

    fn check_bounds(&self) -> Result<(), String> {
        let checks = [
            ("correctness", self.correctness, Self::MAX_CORRECTNESS),
            ("efficiency", self.efficiency, Self::MAX_EFFICIENCY),
            ("style", self.style, Self::MAX_STYLE),
            ("business_insight", self.business_insight, Self::MAX_BUSINESS_INSIGHT),
        ];
        match checks.iter().find(|(_, value, max)| value > max) {
            Some((name, value, max)) => Err(format!("criteria.{name} = {value} exceeds {max}")),
            None => Ok(()),
        }
    }
}

/// Decoded grading verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    pub score: u32,
    pub criteria: GradingCriteria,
    pub feedback_text: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Overwritten with `score >= passing_score` after decoding.
    #[serde(default)]
    pub passed: bool,
}

impl GradingResult {
    fn check_bounds(&self) -> Result<(), String> {
        if self.score > 100 {
            return Err(format!("score = {} exceeds 100", self.score));
        }
        self.criteria.check_bounds()
    }
}

/// Everything the grader knows about one submission.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub code_snippet: String,
    pub challenge_id: String,
    pub language: Language,
    pub challenge_title: String,
    pub challenge_description: String,
    pub expected_behavior: String,
    pub test_cases: Vec<Value>,
    pub difficulty: u32,
    pub passing_score: u32,
}

impl SubmissionContext {
    /// A submission with every optional field at its default.
    pub fn new(
        code_snippet: impl Into<String>,
        challenge_id: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            code_snippet: code_snippet.into(),
            challenge_id: challenge_id.into(),
            language,
            challenge_title: DEFAULT_CHALLENGE_TITLE.to_string(),
            challenge_description: String::new(),
            expected_behavior: String::new(),
            test_cases: Vec::new(),
            difficulty: DEFAULT_DIFFICULTY,
            passing_score: DEFAULT_PASSING_SCORE,
        }
    }

    fn validate(&self) -> Result<(), ServiceError> {
        if self.code_snippet.trim().is_empty() {
            return Err(ServiceError::Validation(
                "code_snippet cannot be empty".to_string(),
            ));
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(ServiceError::Validation(format!(
                "difficulty must be between 1 and 5, got {}",
                self.difficulty
            )));
        }
        if self.passing_score > 100 {
            return Err(ServiceError::Validation(format!(
                "passing_score must be between 0 and 100, got {}",
                self.passing_score
            )));
        }
        Ok(())
    }
}

/// Grading verdict plus the optional suggestion list.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub result: GradingResult,
    /// Present only when `result.score < SUGGESTION_SCORE_THRESHOLD`.
    pub suggestions: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct GradingService {
    model: Arc<dyn CompletionModel>,
}

impl GradingService {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    /// Grades, then asks for suggestions when the score leaves room to improve.
    /// The two calls are strictly sequential.
    pub async fn submit(
        &self,
        submission: &SubmissionContext,
    ) -> Result<SubmissionOutcome, ServiceError> {
        let result = self.grade(submission).await?;

        let suggestions = if result.score < SUGGESTION_SCORE_THRESHOLD {
            Some(
                self.improvement_suggestions(&submission.code_snippet, submission.language, &result)
                    .await?,
            )
        } else {
            None
        };

        Ok(SubmissionOutcome {
            result,
            suggestions,
        })
    }

    pub async fn grade(&self, submission: &SubmissionContext) -> Result<GradingResult, ServiceError> {
        submission.validate()?;

        let system = format!("{GRADING_SYSTEM_PROMPT}\n\n{JSON_ONLY_INSTRUCTION}");
        let prompt = build_grading_prompt(submission);

        let raw = self
            .model
            .complete(CompletionRequest::json(system, prompt, GRADING_TEMPERATURE))
            .await?;

        let mut result: GradingResult = decode_json(&raw)?;
        result
            .check_bounds()
            .map_err(|reason| SchemaError { raw, reason })?;

        if result.criteria.total() != result.score {
            warn!(
                "Criteria sum {} differs from score {} for challenge {}; keeping model score",
                result.criteria.total(),
                result.score,
                submission.challenge_id
            );
        }

        let model_passed = result.passed;
        result.passed = result.score >= submission.passing_score;
        if model_passed != result.passed {
            warn!(
                "Model reported passed={} for score {}/{}; overriding to {}",
                model_passed, result.score, submission.passing_score, result.passed
            );
        }

        info!(
            "Graded challenge {} ({}): score={}, passed={}",
            submission.challenge_id, submission.language, result.score, result.passed
        );

        Ok(result)
    }

    /// Asks for 3-5 concrete suggestions, segmented into at most 5 lines.
    pub async fn improvement_suggestions(
        &self,
        code: &str,
        language: Language,
        result: &GradingResult,
    ) -> Result<Vec<String>, ServiceError> {
        let score = result.score.to_string();
        let improvements = result.improvements.join(", ");
        let prompt = render_template(
            SUGGESTION_PROMPT_TEMPLATE,
            &[
                ("language", language.as_str()),
                ("code", code),
                ("score", &score),
                ("feedback", &result.feedback_text),
                ("improvements", &improvements),
            ],
        );

        let raw = self
            .model
            .complete(CompletionRequest::text(
                SUGGESTION_SYSTEM_PROMPT,
                prompt,
                SUGGESTION_TEMPERATURE,
            ))
            .await?;

        let suggestions = extract_suggestions(&raw);
        info!("Extracted {} improvement suggestions", suggestions.len());
        Ok(suggestions)
    }
}

/// Fills the challenge context template with submission metadata and the fenced code.
fn build_grading_prompt(submission: &SubmissionContext) -> String {
    let expected_behavior = if submission.expected_behavior.trim().is_empty() {
        DEFAULT_EXPECTED_BEHAVIOR
    } else {
        submission.expected_behavior.as_str()
    };

    let test_cases = if submission.test_cases.is_empty() {
        NO_TEST_CASES.to_string()
    } else {
        format!("{:#}", Value::Array(submission.test_cases.clone()))
    };

    let difficulty = submission.difficulty.to_string();
    let passing_score = submission.passing_score.to_string();

    render_template(
        CHALLENGE_CONTEXT_TEMPLATE,
        &[
            ("challenge_title", &submission.challenge_title),
            ("challenge_description", &submission.challenge_description),
            ("language", submission.language.as_str()),
            ("difficulty", &difficulty),
            ("passing_score", &passing_score),
            ("expected_behavior", expected_behavior),
            ("test_cases", &test_cases),
            ("student_code", &submission.code_snippet),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

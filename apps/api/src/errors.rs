use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{LlmError, SchemaError};

/// Error returned by the tutor and grading orchestrators.
/// Callers match on the kind; nothing here is retried or recovered.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model invocation failed: {0}")]
    Model(#[from] LlmError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Schema(e) => {
                AppError::Llm(format!("{e}; raw output: {:?}", truncate(&e.raw, 500)))
            }
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response = AppError::from(ServiceError::Validation("message is empty".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_model_failure_maps_to_internal_error() {
        let err = ServiceError::Model(LlmError::Api {
            status: 429,
            message: "rate limited".into(),
        });
        let app_err = AppError::from(err);
        assert!(matches!(&app_err, AppError::Llm(msg) if msg.contains("rate limited")));
        assert_eq!(
            app_err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_schema_failure_keeps_raw_output_in_log_message() {
        let err = ServiceError::Schema(SchemaError {
            raw: "not json".into(),
            reason: "expected value at line 1 column 1".into(),
        });
        match AppError::from(err) {
            AppError::Llm(msg) => assert!(msg.contains("not json")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}

//! Request extractors shared by the route handlers.

use axum::extract::FromRequest;

use crate::errors::AppError;

/// JSON body extractor whose rejection is an `AppError`, so malformed bodies
/// and unknown enum values get the standard `{"error": {...}}` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

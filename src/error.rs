use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::store::StoreError;
use crate::submission::ValidationError;

/// Message returned to callers for any failure they cannot act on.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(err) => failure(StatusCode::BAD_REQUEST, &err.to_string()),
            AppError::Store(err) => {
                tracing::error!("Store error: {err}");
                internal_error_response()
            }
        }
    }
}

/// The 500 body. Detail never leaves the log.
pub fn internal_error_response() -> Response {
    failure(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
}

fn failure(status: StatusCode, message: &str) -> Response {
    let body = json!({ "success": false, "message": message });
    (status, axum::Json(body)).into_response()
}

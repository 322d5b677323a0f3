pub mod health;
pub mod update;

// Common response types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::errors::UpdateError;
use serde::Serialize;

/// Standard API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub trace_id: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            trace_id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl From<UpdateError> for ErrorResponse {
    fn from(err: UpdateError) -> Self {
        ErrorResponse::new(err.category(), err.to_string())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        // Every orchestration failure aborts the request as a server error;
        // the untrusted-caller 403 is produced by the cron middleware.
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

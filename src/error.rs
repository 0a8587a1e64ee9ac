use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Malformed form value: {0}")]
    MalformedValue(#[from] serde_json::Error),

    #[error("Invalid value at {path}: {source}")]
    InvalidField {
        path: String,
        source: serde_json::Error,
    },

    #[error("No course form is mounted")]
    NoFormMounted,

    #[error("Not found")]
    NotFound,

    #[error("Unknown form path: {0}")]
    UnknownPath(String),

    #[error("Form path {0} is not a control")]
    NotAControl(String),

    #[error("Form path {0} is not an array")]
    NotAnArray(String),

    #[error("Plan index {index} out of range (plans: {len})")]
    PlanIndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for EditorError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            EditorError::NotFound | EditorError::NoFormMounted => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            EditorError::UnknownPath(_)
            | EditorError::NotAControl(_)
            | EditorError::NotAnArray(_)
            | EditorError::MalformedValue(_)
            | EditorError::InvalidField { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            EditorError::PlanIndexOutOfRange { .. } => (StatusCode::CONFLICT, self.to_string()),
            EditorError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            EditorError::Migration(_) | EditorError::Config(_) => {
                error!("internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
        });

        (status, body).into_response()
    }
}

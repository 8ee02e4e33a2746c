use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::timetable::SelectionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Schedule conflict with '{0}'")]
    ScheduleConflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::IndexOutOfRange { index, len } => {
                AppError::IndexOutOfRange { index, len }
            }
            SelectionError::ScheduleConflict { name } => AppError::ScheduleConflict(name),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::IndexOutOfRange { .. } => {
                (StatusCode::BAD_REQUEST, "INDEX_OUT_OF_RANGE", self.to_string())
            }
            AppError::ScheduleConflict(_) => {
                (StatusCode::CONFLICT, "SCHEDULE_CONFLICT", self.to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "The course catalog could not be generated".to_string(),
                )
            }
            AppError::S3(msg) => {
                tracing::error!("S3 error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "S3_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_errors_map_to_app_errors() {
        let err: AppError = SelectionError::ScheduleConflict {
            name: "Circuits".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::ScheduleConflict(ref n) if n == "Circuits"));

        let err: AppError = SelectionError::IndexOutOfRange { index: 5, len: 2 }.into();
        assert_eq!(err.to_string(), "Index 5 out of range (length 2)");
    }

    #[test]
    fn test_status_codes() {
        let conflict = AppError::ScheduleConflict("A".into()).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let range = AppError::IndexOutOfRange { index: 1, len: 0 }.into_response();
        assert_eq!(range.status(), StatusCode::BAD_REQUEST);

        let missing = AppError::NotFound("session".into()).into_response();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Body sent for every failed submission. The cause is logged, never returned.
pub const SAVE_FAILED_MESSAGE: &str = "Error saving form";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a multipart request: {0}")]
    NotMultipart(#[from] MultipartRejection),

    #[error("Invalid multipart payload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Unexpected part '{0}'")]
    UnexpectedPart(String),

    #[error("File part '{field}' exceeds {limit} bytes")]
    FileTooLarge { field: &'static str, limit: usize },

    #[error("Missing required file part '{0}'")]
    MissingFile(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(path) => {
                tracing::debug!("No route for {path}");
                (StatusCode::NOT_FOUND, "Not found")
            }
            AppError::NotMultipart(_)
            | AppError::Multipart(_)
            | AppError::UnexpectedPart(_)
            | AppError::FileTooLarge { .. }
            | AppError::MissingFile(_)
            | AppError::Validation(_) => {
                tracing::warn!("Rejected submission: {self}");
                (StatusCode::BAD_REQUEST, SAVE_FAILED_MESSAGE)
            }
            AppError::Storage(_) | AppError::Database(_) => {
                tracing::error!("Failed to save submission: {self:?}");
                (StatusCode::BAD_REQUEST, SAVE_FAILED_MESSAGE)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::image_uploader::UploadError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Missing or invalid file: {0}")]
    MissingOrInvalidFile(String),
    #[error("Image upload failed: {0}")]
    UploadTransportError(String),
    #[error("Image upload rejected: {0}")]
    UploadRejected(String),
    #[error("Image upload response malformed: {0}")]
    UploadResponseMalformed(String),
    #[error("Not Found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("JWT creation failed: {0}")]
    TokenCreationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::MissingOrInvalidFile(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Missing or invalid image file: {msg}"),
            ),
            // Image host details stay in the logs.
            AppError::UploadTransportError(_) => (
                StatusCode::BAD_GATEWAY,
                "Could not reach the image host".to_string(),
            ),
            AppError::UploadRejected(_) => (
                StatusCode::BAD_GATEWAY,
                "The image host rejected the upload".to_string(),
            ),
            AppError::UploadResponseMalformed(_) => (
                StatusCode::BAD_GATEWAY,
                "The image host returned an unexpected response".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            AppError::TokenCreationError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Token creation error: {msg}"),
            ),
        };
        (status, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Transport(msg) => AppError::UploadTransportError(msg),
            e @ UploadError::Rejected { .. } => AppError::UploadRejected(e.to_string()),
            UploadError::MalformedResponse(msg) => AppError::UploadResponseMalformed(msg),
        }
    }
}

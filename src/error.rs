//! Error types for the basta library.
//!
//! This module provides custom error types using `thiserror` for better error
//! handling and more specific error messages throughout the application, plus
//! the mapping from errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Errors that can occur in the basta application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// File I/O errors
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Requested entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Request payload failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Order-sheet workbook could not be decoded
    #[error("order sheet error: {0}")]
    Sheet(String),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        AppError::Validation(format!("multipart error: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Sheet(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Io(_)
            | AppError::Serialization(_)
            | AppError::InvalidConfig(_)
            | AppError::Other(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({ "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("customer 7".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = AppError::Validation("no file uploaded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let response = AppError::Other("secret pool state".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

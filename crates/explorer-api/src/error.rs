//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use explorer_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Handler result.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status and code for an error kind.
    pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
        match kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Gone => (StatusCode::GONE, "GONE"),
            ErrorKind::Database => (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE"),
            ErrorKind::Serialization | ErrorKind::Configuration | ErrorKind::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, code) = Self::status_for(err.kind);

        // Storage and internal failures keep their details in the log only.
        let message = match err.kind {
            ErrorKind::Database => {
                warn!(error = %err, source = ?err.source, "Storage failure");
                "Storage temporarily unavailable, please retry".to_string()
            }
            ErrorKind::Serialization | ErrorKind::Configuration | ErrorKind::Internal => {
                error!(error = %err, source = ?err.source, "Internal server error");
                "Internal server error".to_string()
            }
            _ => err.message,
        };

        let body = ApiErrorResponse {
            error: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

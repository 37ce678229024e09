use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use roster::RosterError;

use crate::service::ServiceError;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Error wrapper for API handlers
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Extractor rejections: bad JSON, bad path segment, bad query string.
    BadRequest(String),
    InvalidIdentifier(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        ApiError::Service(e)
    }
}

impl From<RosterError> for ApiError {
    fn from(e: RosterError) -> Self {
        ApiError::Service(ServiceError::Invalid(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::Service(ServiceError::Invalid(e)) => {
                tracing::warn!(kind = e.kind(), "rejected request: {e}");
                (StatusCode::BAD_REQUEST, e.kind(), e.to_string())
            }
            ApiError::Service(e @ ServiceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found", e.to_string())
            }
            ApiError::Service(ServiceError::Store(e)) => {
                tracing::error!(error = %e, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal storage error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("rejected request: {msg}");
                (StatusCode::BAD_REQUEST, "validation_failed", msg)
            }
            ApiError::InvalidIdentifier(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_identifier", msg)
            }
        };

        (status, Json(ErrorResponse::new(error_type, message))).into_response()
    }
}

// src/web/error.rs
// JSON error responses for the HTTP API

use crate::error::ExpertError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

/// Standard API error response format
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: Option<String>,
}

impl ApiError {
    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>, error_code: &str) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: Some(error_code.to_string()),
        }
    }

    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code: Some("INTERNAL_ERROR".to_string()),
        }
    }

    /// Create a new custom error with specific status code
    pub fn custom(status_code: StatusCode, message: impl Into<String>, error_code: &str) -> Self {
        Self {
            message: message.into(),
            status_code,
            error_code: Some(error_code.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ExpertError> for ApiError {
    fn from(err: ExpertError) -> Self {
        let message = err.to_user_string();
        match err {
            ExpertError::Validation(_) => ApiError::bad_request(message, "VALIDATION_ERROR"),
            ExpertError::UnknownPersona(_) => ApiError::bad_request(message, "UNKNOWN_PERSONA"),
            ExpertError::Upstream(_) => {
                ApiError::custom(StatusCode::BAD_GATEWAY, message, "UPSTREAM_ERROR")
            }
            ExpertError::Timeout(_) => {
                ApiError::custom(StatusCode::GATEWAY_TIMEOUT, message, "UPSTREAM_TIMEOUT")
            }
            ExpertError::Cancelled => {
                ApiError::custom(StatusCode::SERVICE_UNAVAILABLE, message, "CANCELLED")
            }
            ExpertError::Config(_) => {
                error!("{}", message);
                ApiError::internal(message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response_json = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16()
        });

        if let Some(error_code) = self.error_code {
            response_json["error_code"] = json!(error_code);
        }

        (self.status_code, Json(response_json)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

//! Error types for the intake service.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session store errors.
///
/// The in-memory store never fails; these exist for stores backed by
/// something that can.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;

/// Error codes carried in the `error` field of an [`ErrorBody`].
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// JSON body returned for every rejected request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Request-level error that converts to a structured HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was missing, malformed, or failed to deserialize.
    Validation {
        status: StatusCode,
        message: String,
        detail: String,
    },
    /// Anything the caller cannot fix (500).
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(_) => "Request body did not match the expected shape",
            JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`"
            }
            _ => "Failed to read request body",
        };
        Self::Validation {
            status: rejection.status(),
            message: message.to_string(),
            detail: rejection.body_text(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation {
                status,
                message,
                detail,
            } => {
                tracing::warn!(status = %status, %detail, "Rejected request");
                (
                    status,
                    ErrorBody {
                        error: codes::VALIDATION_FAILED.to_string(),
                        message,
                        detail: Some(detail),
                    },
                )
            }
            ApiError::Internal(reason) => {
                tracing::error!(%reason, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: codes::INTERNAL_ERROR.to_string(),
                        message: "An internal error occurred".to_string(),
                        detail: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

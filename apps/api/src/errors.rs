use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Gateway-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Generation failures never reach this type: they are ordinary `200` responses
/// carrying the failure shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not implemented")]
    NotImplemented,
}

/// How the gateway answers a request whose body is missing, unparseable or has no `query`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedRequestPolicy {
    /// `500 Internal server error`, the historical behaviour.
    #[default]
    InternalError,
    /// `400 Bad request`.
    BadRequest,
}

impl MalformedRequestPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "internal_error" | "500" => Some(Self::InternalError),
            "bad_request" | "400" => Some(Self::BadRequest),
            _ => None,
        }
    }

    pub fn reject(self, details: impl Into<String>) -> AppError {
        match self {
            Self::InternalError => AppError::Internal(details.into()),
            Self::BadRequest => AppError::BadRequest(details.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::BadRequest(details) => {
                tracing::warn!("Rejected request: {details}");
                (StatusCode::BAD_REQUEST, "Bad request", details)
            }
            AppError::Internal(details) => {
                tracing::error!("Internal error: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    details,
                )
            }
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "Not implemented",
                "This endpoint is not yet implemented".to_string(),
            ),
        };

        (status, Json(json!({ "error": error, "details": details }))).into_response()
    }
}

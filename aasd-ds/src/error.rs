//! API error type for aasd-ds

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Product catalog could not be loaded (503)
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<aasd_common::Error> for ApiError {
    fn from(err: aasd_common::Error) -> Self {
        use aasd_common::Error;

        match err {
            Error::InvalidInput(_) | Error::InvalidScaleReference(_) => {
                ApiError::BadRequest(err.to_string())
            }
            Error::CatalogLoad { .. } => ApiError::CatalogUnavailable(err.to_string()),
            Error::Config(_) | Error::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// Malformed or mistyped request bodies answer with the JSON error envelope
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::CatalogUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CATALOG_UNAVAILABLE",
                msg,
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Convenience type for handler results
pub type ApiResult<T> = Result<T, ApiError>;

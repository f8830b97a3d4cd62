use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Failure taxonomy shared by the poster and scrape operations.
///
/// Every variant renders as `{ "success": false, "error": <message> }` with the
/// status code from [`ApiError::status`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed or wrong-domain URL. Raised before any network access.
    #[error("{0}")]
    InvalidInput(String),
    /// Remote page returned a non-success status, or nothing extractable was found.
    #[error("{0}")]
    NotFound(String),
    #[error("Upstream request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Internal failure with the generic message; the cause is expected to be logged by the caller.
    pub fn internal() -> Self { ApiError::Internal(INTERNAL_MESSAGE.to_string()) }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::NotFound(_) => "not_found",
            ApiError::Timeout(_) => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn body(&self) -> ErrorBody { ErrorBody { success: false, error: self.to_string() } }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

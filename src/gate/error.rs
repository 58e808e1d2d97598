//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into JSON responses with the right status code.
//! Handlers return `Result<_, ApiError>` instead of losing error context
//! with a bare `StatusCode`.
//!
//! The underlying message is surfaced verbatim to the caller: this is an
//! internal tool where fast diagnosis beats hiding backend error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// API error with HTTP status code and human-readable message.
///
/// Converts to a JSON response: `{"error": "message"}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: unrecognized request type or malformed body
    BadRequest(String),
    /// 500 Internal Server Error: configuration or upstream failure
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

//! Error types for lexos
//!
//! Two layers, mirroring the split in the request path: [`Error`] for the
//! extraction pipeline (ISBN validation, browser engine, step timeouts) and
//! [`ApiError`] for HTTP handlers, which maps onto status codes.
//!
//! Note the deliberate asymmetry with extraction *degradation*: a missing
//! selector or an upstream "no results" page is not an `Error` at all. The
//! extractors resolve those to sentinel field values locally; only input
//! and resource failures ever abort a request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the extraction pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// ISBN failed checksum validation
    #[error("invalid isbn: {0}")]
    InvalidIsbn(String),

    /// Configuration file loading errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Chrome DevTools Protocol errors from the browser engine
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// The browser pool has no engine attached (not launched, or shut down)
    #[error("browser engine unavailable")]
    EngineUnavailable,

    /// A bounded wait expired before the expected condition held
    #[error("timed out waiting for {0}")]
    StepTimeout(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using the lexos Error
pub type Result<T> = std::result::Result<T, Error>;

/// API error type for HTTP handlers
///
/// Handlers only ever refuse bad input before the upgrade; every failure
/// after the upgrade reports through the socket's `error:` frame instead
/// of an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
        };

        let body = Json(json!({
            "error": error_code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

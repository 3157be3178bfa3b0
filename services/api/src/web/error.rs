//! services/api/src/web/error.rs
//!
//! Maps port errors onto the fixed status codes and plain-text bodies the
//! HTTP surface exposes.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use bookstore_core::ports::PortError;
use tracing::{error, warn};

/// The error half of every handler's return type.
pub type HttpError = (StatusCode, String);

pub fn http_error(err: PortError) -> HttpError {
    match err {
        PortError::BookNotFound(_) => (StatusCode::NOT_FOUND, "Book not found".to_string()),
        PortError::ReviewNotFound(_) => (StatusCode::NOT_FOUND, "Review not found".to_string()),
        PortError::AlreadyExists(_) => (StatusCode::BAD_REQUEST, "User already exists".to_string()),
        PortError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        PortError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
        }
        PortError::MissingToken => (StatusCode::UNAUTHORIZED, "Access denied".to_string()),
        PortError::InvalidToken(_) => (StatusCode::BAD_REQUEST, "Invalid token".to_string()),
        PortError::Unexpected(msg) => {
            error!("Unexpected service error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Unwraps a JSON body, falling back to an empty one when the body is missing,
/// has the wrong content type, or does not match `T`. The handler's own
/// presence checks then answer with the usual 400/401.
pub fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            warn!("Unreadable request body: {}", rejection.body_text());
            T::default()
        }
    }
}

//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use bookstore_core::ports::PortError;
use std::sync::Arc;
use tracing::warn;

use crate::web::error::{http_error, HttpError};
use crate::web::state::AppState;

/// The identity a verified session token asserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

/// Middleware that verifies the session token in the `Authorization` header.
///
/// The header carries the raw token; a `Bearer ` prefix is accepted and stripped.
/// If valid, inserts an `AuthenticatedUser` into request extensions for handlers to use.
/// A missing token yields 401; a bad or expired one, or a header that is not
/// visible ASCII, yields 400.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    // 1. Extract the token, if any
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str())
        .transpose()
        .map_err(|_| {
            warn!("Rejected request to {}: unreadable authorization header", req.uri().path());
            http_error(PortError::InvalidToken(
                "unreadable authorization header".to_string(),
            ))
        })?
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v));

    // 2. Verify signature and expiry
    let claims = state.tokens.verify(token).map_err(|e| {
        warn!("Rejected request to {}: {}", req.uri().path(), e);
        http_error(e)
    })?;

    // 3. Insert the caller's identity into request extensions
    req.extensions_mut()
        .insert(AuthenticatedUser(claims.username));

    // 4. Continue to the handler
    Ok(next.run(req).await)
}

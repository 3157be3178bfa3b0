//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user registration and login.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::web::error::{body_or_default, http_error, HttpError};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// Body of both `/users/register` and `/users/login`. Missing fields are
/// treated as empty so they surface as a 400/401 rather than a parse failure.
#[derive(Default, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn fields(&self) -> (&str, &str) {
        (
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /users/register - Create a new user account
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "User registered successfully", body = String),
        (status = 400, description = "Missing fields or user already exists")
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = body_or_default(body);
    let (username, password) = req.fields();
    state.users.register(username, password).await.map_err(|e| {
        warn!("Registration failed for '{}': {}", username, e);
        http_error(e)
    })?;

    info!("Registered user '{}'", username);
    Ok((StatusCode::OK, "User registered successfully"))
}

/// POST /users/login - Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = body_or_default(body);
    let (username, password) = req.fields();

    // 1. Check the credentials; no token is issued on failure
    let user = state
        .users
        .authenticate(username, password)
        .await
        .map_err(|e| {
            warn!("Login failed for '{}'", username);
            http_error(e)
        })?;

    // 2. Sign a session token for the user
    let token = state.tokens.issue(&user.username).map_err(http_error)?;

    info!("User '{}' logged in", user.username);
    Ok(Json(LoginResponse { token }))
}

//! services/api/src/web/reviews.rs
//!
//! Handlers for listing, adding, and deleting book reviews. The mutating
//! handlers sit behind `require_auth` and act as the token's user.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::error::{body_or_default, http_error, HttpError};
use crate::web::middleware::AuthenticatedUser;
use crate::web::rest::ReviewResponse;
use crate::web::state::AppState;

#[derive(Default, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    #[serde(default)]
    pub review: Option<String>,
}

/// How a delete request addresses a review: by its current position or by its
/// stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewRef {
    Index(usize),
    Id(Uuid),
}

impl ReviewRef {
    pub fn parse(raw: &str) -> Option<Self> {
        if let Ok(index) = raw.parse::<usize>() {
            return Some(Self::Index(index));
        }
        Uuid::parse_str(raw).ok().map(Self::Id)
    }
}

/// List the reviews of a book, oldest first.
#[utoipa::path(
    get,
    path = "/books/{isbn}/reviews",
    params(("isbn" = String, Path, description = "The book's ISBN.")),
    responses(
        (status = 200, description = "The book's reviews", body = [ReviewResponse]),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_reviews_handler(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = state.catalog.list_reviews(&isbn).await.map_err(http_error)?;
    Ok(Json(
        reviews
            .into_iter()
            .map(ReviewResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Append a review written by the authenticated user.
#[utoipa::path(
    post,
    path = "/books/{isbn}/reviews",
    request_body = AddReviewRequest,
    params(
        ("isbn" = String, Path, description = "The book's ISBN."),
        ("Authorization" = String, Header, description = "Session token from /users/login.")
    ),
    responses(
        (status = 200, description = "Review added", body = String),
        (status = 400, description = "Missing review text or invalid token"),
        (status = 401, description = "No token presented"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn add_review_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(username)): Extension<AuthenticatedUser>,
    Path(isbn): Path<String>,
    body: Result<Json<AddReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let req = body_or_default(body);
    let text = match req.review.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Review text is required".to_string(),
            ))
        }
    };

    let review = state
        .catalog
        .add_review(&isbn, &username, text)
        .await
        .map_err(http_error)?;

    info!("User '{}' added review {} to book {}", username, review.id, isbn);
    Ok((StatusCode::OK, "Review added"))
}

/// Delete one of the authenticated user's own reviews.
///
/// `review_id` is either the review's current position in the book's list or
/// its stable id.
#[utoipa::path(
    delete,
    path = "/books/{isbn}/reviews/{review_id}",
    params(
        ("isbn" = String, Path, description = "The book's ISBN."),
        ("review_id" = String, Path, description = "Positional index or review UUID."),
        ("Authorization" = String, Header, description = "Session token from /users/login.")
    ),
    responses(
        (status = 200, description = "Review deleted", body = String),
        (status = 400, description = "Malformed review id or invalid token"),
        (status = 401, description = "No token presented"),
        (status = 404, description = "Book or review not found")
    )
)]
pub async fn delete_review_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthenticatedUser(username)): Extension<AuthenticatedUser>,
    Path((isbn, review_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let target = ReviewRef::parse(&review_id)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Invalid review id".to_string()))?;

    let result = match target {
        ReviewRef::Index(index) => state.catalog.delete_review(&isbn, &username, index).await,
        ReviewRef::Id(id) => {
            state
                .catalog
                .delete_review_by_id(&isbn, &username, id)
                .await
        }
    };
    result.map_err(|e| {
        warn!("User '{}' could not delete review {} on {}: {}", username, review_id, isbn, e);
        http_error(e)
    })?;

    info!("User '{}' deleted review {} from book {}", username, review_id, isbn);
    Ok((StatusCode::OK, "Review deleted"))
}

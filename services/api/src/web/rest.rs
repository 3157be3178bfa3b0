//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the catalog endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::{
    auth::{CredentialsRequest, LoginResponse},
    error::{http_error, HttpError},
    reviews::AddReviewRequest,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use bookstore_core::domain::{Book, Review};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_books_handler,
        get_book_handler,
        books_by_author_handler,
        books_by_title_handler,
        crate::web::reviews::list_reviews_handler,
        crate::web::reviews::add_review_handler,
        crate::web::reviews::delete_review_handler,
        crate::web::auth::register_handler,
        crate::web::auth::login_handler,
        health_handler,
    ),
    components(
        schemas(
            BookResponse,
            ReviewResponse,
            CredentialsRequest,
            LoginResponse,
            AddReviewRequest,
            HealthResponse
        )
    ),
    tags(
        (name = "Bookstore API", description = "Catalog search, accounts, and book reviews.")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document as pretty-printed JSON, stamped with the crate version.
pub fn render_api_doc() -> Result<String, ApiError> {
    let mut doc = ApiDoc::openapi();
    doc.info.title = "Bookstore API".to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc.to_pretty_json()
        .map_err(|e| ApiError::Internal(format!("cannot serialize OpenAPI document: {}", e)))
}

//=========================================================================================
// API Response Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// A review as sent over the wire. The text travels under the `review` key.
#[derive(Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub username: String,
    #[serde(rename = "review")]
    pub text: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            username: review.username,
            text: review.text,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub reviews: Vec<ReviewResponse>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            reviews: book.reviews.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}

fn to_responses(books: Vec<Book>) -> Json<Vec<BookResponse>> {
    Json(books.into_iter().map(BookResponse::from).collect())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List every book in the catalog.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books, in catalog order", body = [BookResponse])
    )
)]
pub async fn list_books_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let books = state.catalog.list_books().await.map_err(http_error)?;
    Ok(to_responses(books))
}

/// Fetch a single book by ISBN.
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "The book's ISBN.")),
    responses(
        (status = 200, description = "The book", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_handler(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let book = state.catalog.get_by_isbn(&isbn).await.map_err(http_error)?;
    Ok(Json(BookResponse::from(book)))
}

/// Books whose author equals `name`, ignoring case.
#[utoipa::path(
    get,
    path = "/books/author/{name}",
    params(("name" = String, Path, description = "Author name, matched case-insensitively.")),
    responses(
        (status = 200, description = "Matching books", body = [BookResponse])
    )
)]
pub async fn books_by_author_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let books = state
        .catalog
        .filter_by_author(&name)
        .await
        .map_err(http_error)?;
    Ok(to_responses(books))
}

/// Books whose title contains `title`, ignoring case.
#[utoipa::path(
    get,
    path = "/books/title/{title}",
    params(("title" = String, Path, description = "Title fragment, matched case-insensitively.")),
    responses(
        (status = 200, description = "Matching books", body = [BookResponse])
    )
)]
pub async fn books_by_title_handler(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let books = state
        .catalog
        .filter_by_title(&title)
        .await
        .map_err(http_error)?;
    Ok(to_responses(books))
}

/// Liveness check; reports the running version.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The service is up", body = HealthResponse)
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

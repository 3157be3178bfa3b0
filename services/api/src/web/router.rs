//! services/api/src/web/router.rs
//!
//! Builds the HTTP router: public catalog and account routes, plus the review
//! mutations that require a session token.

use crate::web::{
    auth::{login_handler, register_handler},
    middleware::require_auth,
    rest::{
        books_by_author_handler, books_by_title_handler, get_book_handler, health_handler,
        list_books_handler,
    },
    reviews::{add_review_handler, delete_review_handler, list_reviews_handler},
    state::AppState,
};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Creates the application router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health_handler))
        .route("/books", get(list_books_handler))
        .route("/books/{isbn}", get(get_book_handler))
        .route("/books/author/{name}", get(books_by_author_handler))
        .route("/books/title/{title}", get(books_by_title_handler))
        .route("/books/{isbn}/reviews", get(list_reviews_handler))
        .route("/users/register", post(register_handler))
        .route("/users/login", post(login_handler));

    // Protected routes (session token required)
    let protected_routes = Router::new()
        .route("/books/{isbn}/reviews", post(add_review_handler))
        .route(
            "/books/{isbn}/reviews/{review_id}",
            delete(delete_review_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

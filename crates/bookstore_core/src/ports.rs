//! crates/bookstore_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the bookstore's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific storage or signing implementations.

use crate::domain::{Book, Review, SessionClaims, User};
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error("Review not found: {0}")]
    ReviewNotFound(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("No session token presented")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CatalogService: Send + Sync {
    // --- Catalog Lookup ---
    async fn list_books(&self) -> PortResult<Vec<Book>>;

    /// Bulk listing that completes only after `delay`. The wait cannot be cancelled.
    async fn list_books_delayed(&self, delay: Duration) -> PortResult<Vec<Book>>;

    async fn get_by_isbn(&self, isbn: &str) -> PortResult<Book>;

    async fn filter_by_author(&self, name: &str) -> PortResult<Vec<Book>>;

    async fn filter_by_title(&self, fragment: &str) -> PortResult<Vec<Book>>;

    // --- Review Management ---
    async fn list_reviews(&self, isbn: &str) -> PortResult<Vec<Review>>;

    /// Appends a review to the end of the book's review sequence.
    async fn add_review(&self, isbn: &str, username: &str, text: &str) -> PortResult<Review>;

    /// Removes the review currently at `index`, only if `username` wrote it.
    async fn delete_review(&self, isbn: &str, username: &str, index: usize) -> PortResult<()>;

    /// Removes the review with the given stable id, only if `username` wrote it.
    async fn delete_review_by_id(
        &self,
        isbn: &str,
        username: &str,
        review_id: Uuid,
    ) -> PortResult<()>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user. Both fields must be non-empty and the username unused.
    async fn register(&self, username: &str, password: &str) -> PortResult<()>;

    /// Checks the credentials by exact match.
    async fn authenticate(&self, username: &str, password: &str) -> PortResult<User>;
}

pub trait TokenService: Send + Sync {
    /// Issues a signed session token for `username`.
    fn issue(&self, username: &str) -> PortResult<String>;

    /// Verifies a presented token. `None` means no token was sent.
    fn verify(&self, token: Option<&str>) -> PortResult<SessionClaims>;
}

//! crates/bookstore_core/src/domain.rs
//!
//! Defines the pure, core data structures for the bookstore.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A book in the catalog, keyed by its ISBN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub reviews: Vec<Review>,
}

impl Book {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            reviews: Vec::new(),
        }
    }

    /// Case-insensitive exact match on the author field.
    pub fn is_by_author(&self, name: &str) -> bool {
        self.author.to_lowercase() == name.to_lowercase()
    }

    /// Case-insensitive substring match on the title field.
    pub fn title_contains(&self, fragment: &str) -> bool {
        self.title.to_lowercase().contains(&fragment.to_lowercase())
    }
}

/// A user-authored review attached to a single book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Stable identifier assigned at creation. Positional indices shift on
    /// deletion, this does not.
    pub id: Uuid,
    pub username: String,
    pub text: String,
}

impl Review {
    pub fn new(username: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            text: text.to_string(),
        }
    }
}

// Only used internally for registration/login - contains the plaintext password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
}

/// The claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// The fixed catalog the service starts with.
pub fn seed_catalog() -> Vec<Book> {
    vec![
        Book::new("12345", "Book One", "Author A"),
        Book::new("67890", "Book Two", "Author B"),
    ]
}

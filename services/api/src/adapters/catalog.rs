//! services/api/src/adapters/catalog.rs
//!
//! This module contains the in-memory catalog adapter, the concrete implementation
//! of the `CatalogService` port from the `core` crate. It owns the books and their
//! review sequences for the lifetime of the server.

use async_trait::async_trait;
use bookstore_core::domain::{seed_catalog, Book, Review};
use bookstore_core::ports::{CatalogService, PortError, PortResult};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An in-memory catalog that implements the `CatalogService` port.
///
/// Every review mutation runs under the write lock, so the ownership check and
/// the removal it authorizes can never interleave with another mutation.
pub struct InMemoryCatalog {
    books: RwLock<Vec<Book>>,
}

impl InMemoryCatalog {
    /// Creates a catalog holding `books`, in the given order.
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }

    /// Creates a catalog holding the fixed seed books.
    pub fn seeded() -> Self {
        Self::new(seed_catalog())
    }

    async fn filter<P>(&self, predicate: P) -> Vec<Book>
    where
        P: Fn(&Book) -> bool,
    {
        self.books
            .read()
            .await
            .iter()
            .filter(|&book| predicate(book))
            .cloned()
            .collect()
    }
}

fn find_mut<'a>(books: &'a mut [Book], isbn: &str) -> PortResult<&'a mut Book> {
    books
        .iter_mut()
        .find(|b| b.isbn == isbn)
        .ok_or_else(|| PortError::BookNotFound(isbn.to_string()))
}

//=========================================================================================
// `CatalogService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn list_books(&self) -> PortResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn list_books_delayed(&self, delay: Duration) -> PortResult<Vec<Book>> {
        tokio::time::sleep(delay).await;
        self.list_books().await
    }

    async fn get_by_isbn(&self, isbn: &str) -> PortResult<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|b| b.isbn == isbn)
            .cloned()
            .ok_or_else(|| PortError::BookNotFound(isbn.to_string()))
    }

    async fn filter_by_author(&self, name: &str) -> PortResult<Vec<Book>> {
        Ok(self.filter(|b| b.is_by_author(name)).await)
    }

    async fn filter_by_title(&self, fragment: &str) -> PortResult<Vec<Book>> {
        Ok(self.filter(|b| b.title_contains(fragment)).await)
    }

    async fn list_reviews(&self, isbn: &str) -> PortResult<Vec<Review>> {
        self.get_by_isbn(isbn).await.map(|book| book.reviews)
    }

    async fn add_review(&self, isbn: &str, username: &str, text: &str) -> PortResult<Review> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, isbn)?;
        let review = Review::new(username, text);
        book.reviews.push(review.clone());
        Ok(review)
    }

    async fn delete_review(&self, isbn: &str, username: &str, index: usize) -> PortResult<()> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, isbn)?;
        let owned = book
            .reviews
            .get(index)
            .is_some_and(|review| review.username == username);
        if !owned {
            return Err(PortError::ReviewNotFound(format!("#{} on {}", index, isbn)));
        }
        book.reviews.remove(index);
        Ok(())
    }

    async fn delete_review_by_id(
        &self,
        isbn: &str,
        username: &str,
        review_id: Uuid,
    ) -> PortResult<()> {
        let mut books = self.books.write().await;
        let book = find_mut(&mut books, isbn)?;
        let position = book
            .reviews
            .iter()
            .position(|r| r.id == review_id && r.username == username)
            .ok_or_else(|| PortError::ReviewNotFound(format!("{} on {}", review_id, isbn)))?;
        book.reviews.remove(position);
        Ok(())
    }
}

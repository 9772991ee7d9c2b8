//! Books repository (in-memory shelf)

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFields, BookQuery, BookShort},
};

#[derive(Clone, Default)]
pub struct BooksRepository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// List books matching the query, in insertion order
    pub async fn list(&self, query: &BookQuery) -> Vec<BookShort> {
        let books = self.books.read().await;
        books
            .iter()
            .filter(|book| query.matches(book))
            .map(BookShort::from)
            .collect()
    }

    /// Get a book by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        let books = self.books.read().await;
        books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    pub async fn exists(&self, id: &str) -> bool {
        self.books.read().await.iter().any(|book| book.id == id)
    }

    /// Append a book at the end of the shelf unless its id is already taken.
    /// Returns whether the book was stored.
    pub async fn insert_if_absent(&self, book: Book) -> bool {
        let mut books = self.books.write().await;
        if books.iter().any(|existing| existing.id == book.id) {
            return false;
        }
        books.push(book);
        true
    }

    /// Overwrite the mutable fields of a book, returning the updated record
    pub async fn update(
        &self,
        id: &str,
        fields: &BookFields,
        now: DateTime<Utc>,
    ) -> AppResult<Book> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound("Failed to update book. Id not found".to_string()))?;
        book.apply(fields, now);
        Ok(book.clone())
    }

    /// Delete a book
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound("Failed to delete book. Id not found".to_string()))?;
        books.remove(index);
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}

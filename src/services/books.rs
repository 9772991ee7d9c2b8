//! Book shelf service

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFields, BookPayload, BookQuery, BookShort},
    repository::Repository,
};

use super::ids::IdGenerator;

/// Attempts at drawing an id that is not already on the shelf
const MAX_ID_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy)]
enum WriteAction {
    Add,
    Update,
}

impl WriteAction {
    fn failure_prefix(self) -> &'static str {
        match self {
            WriteAction::Add => "Failed to add book",
            WriteAction::Update => "Failed to update book",
        }
    }
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
}

impl BooksService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repository, ids }
    }

    /// Validate and add a new book, returning its id
    pub async fn create(&self, data: &BookPayload) -> AppResult<String> {
        let fields = check_payload(data, WriteAction::Add)?;
        let now = Utc::now();

        let mut stored = None;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            let book = Book::new(id.clone(), fields.clone(), now);
            if self.repository.books.insert_if_absent(book).await {
                stored = Some(id);
                break;
            }
            tracing::warn!("Generated book id {} already in use, retrying", id);
        }
        let id = stored.ok_or_else(|| {
            AppError::Internal(format!(
                "{}. Could not generate a unique id",
                WriteAction::Add.failure_prefix()
            ))
        })?;

        if !self.repository.books.exists(&id).await {
            return Err(AppError::Internal(WriteAction::Add.failure_prefix().to_string()));
        }

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    /// List books matching the query filters
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<BookShort>> {
        query
            .validate()
            .map_err(|_| AppError::BadRequest("Query parameter name must not be empty".to_string()))?;
        let books = self.repository.books.list(query).await;
        tracing::debug!("Listed {} book(s) for {:?}", books.len(), query);
        Ok(books)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Validate and replace every mutable field of an existing book
    pub async fn update(&self, id: &str, data: &BookPayload) -> AppResult<Book> {
        let fields = check_payload(data, WriteAction::Update)?;
        let book = self.repository.books.update(id, &fields, Utc::now()).await?;
        tracing::info!("Book updated: id={}", id);
        Ok(book)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of books on the shelf
    pub async fn count(&self) -> usize {
        self.repository.books.count().await
    }
}

/// Name must be present and non-empty, numbers whole, and readPage may not
/// exceed pageCount
fn check_payload(data: &BookPayload, action: WriteAction) -> AppResult<BookFields> {
    if data.validate().is_err() {
        return Err(AppError::Validation(format!(
            "{}. Please provide the book name",
            action.failure_prefix()
        )));
    }
    let fields = data.to_fields().map_err(|field| {
        AppError::Validation(format!(
            "{}. {} must be a whole number",
            action.failure_prefix(),
            field
        ))
    })?;
    if fields.read_page_exceeds_page_count() {
        return Err(AppError::Validation(format!(
            "{}. readPage must not be greater than pageCount",
            action.failure_prefix()
        )));
    }
    Ok(fields)
}

//! Business logic services

pub mod books;
pub mod ids;

use std::sync::Arc;

use crate::{config::BooksConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, books_config: &BooksConfig) -> Self {
        let ids = Arc::new(ids::NanoIdGenerator::new(books_config.id_length));
        Self::with_id_generator(repository, ids)
    }

    /// Create all services drawing book ids from `ids`
    pub fn with_id_generator(repository: Repository, ids: Arc<dyn ids::IdGenerator>) -> Self {
        Self {
            books: books::BooksService::new(repository, ids),
        }
    }
}

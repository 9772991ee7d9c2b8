//! Bookshelf Server
//!
//! A REST JSON API for keeping track of books on a shelf: add, list,
//! look up, update and remove books, with reading progress tracked per book.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state around an empty shelf
    pub fn new(config: AppConfig) -> Self {
        let services = services::Services::new(repository::Repository::new(), &config.books);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}

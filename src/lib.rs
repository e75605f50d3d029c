//! Library catalog server
//!
//! Keeps the catalog of a small library (authors, books, languages, genres
//! and the physical copies of each book) in PostgreSQL, and serves a JSON
//! administrative interface over it.

use std::sync::Arc;

pub mod admin;
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

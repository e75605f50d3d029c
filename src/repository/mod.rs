//! Repository layer for database operations
//!
//! Each entity has a store trait, implemented here over PostgreSQL, so the
//! services can be exercised against mocks.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod languages;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use authors::AuthorStore;
pub use book_instances::{BookInstanceStore, InstanceFilter};
pub use books::BookStore;
pub use genres::GenreStore;
pub use languages::LanguageStore;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
    pub genres: genres::GenresRepository,
    pub languages: languages::LanguagesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            languages: languages::LanguagesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

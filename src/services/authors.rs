//! Authors service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{inverted_dates, Author, CreateAuthor, UpdateAuthor},
    repository::AuthorStore,
};

#[derive(Clone)]
pub struct AuthorsService {
    authors: Arc<dyn AuthorStore>,
}

impl AuthorsService {
    pub fn new(authors: Arc<dyn AuthorStore>) -> Self {
        Self { authors }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Author>, i64)> {
        self.authors.list(limit, offset).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Author> {
        self.authors.get_by_id(id).await
    }

    /// Create an author.
    ///
    /// A death date before the birth date is accepted but logged.
    pub async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        if inverted_dates(data.date_of_birth, data.date_of_death) {
            tracing::warn!(
                "Author {} {} has a death date before the birth date",
                data.first_name,
                data.last_name
            );
        }

        let author = self.authors.create(data).await?;
        tracing::info!("Created author id={} ({})", author.id, author);
        Ok(author)
    }

    pub async fn update(&self, id: i32, data: &UpdateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.authors.update(id, data).await?;
        if author.has_inverted_dates() {
            tracing::warn!("Author id={} has a death date before the birth date", id);
        }
        Ok(author)
    }

    /// Delete an author; their books go with them
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.authors.delete(id).await?;
        tracing::info!("Deleted author id={} and their books", id);
        Ok(())
    }
}

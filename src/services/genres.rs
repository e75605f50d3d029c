//! Genre lookup service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::genre::{CreateGenre, Genre, UpdateGenre},
    repository::GenreStore,
};

#[derive(Clone)]
pub struct GenresService {
    genres: Arc<dyn GenreStore>,
}

impl GenresService {
    pub fn new(genres: Arc<dyn GenreStore>) -> Self {
        Self { genres }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Genre>, i64)> {
        self.genres.list(limit, offset).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Genre> {
        self.genres.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        data.validate()?;
        let genre = self.genres.create(data).await?;
        tracing::info!("Created genre id={} ({})", genre.id, genre);
        Ok(genre)
    }

    pub async fn update(&self, id: i32, data: &UpdateGenre) -> AppResult<Genre> {
        data.validate()?;
        self.genres.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.genres.delete(id).await?;
        tracing::info!("Deleted genre id={}", id);
        Ok(())
    }
}

//! Genres repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::genre::{CreateGenre, Genre, UpdateGenre},
};

/// Storage operations for genres
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Genre>, i64)>;
    async fn get_by_id(&self, id: i32) -> AppResult<Genre>;
    /// Ids from `ids` that have no genre row
    async fn missing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>>;
    async fn create(&self, data: &CreateGenre) -> AppResult<Genre>;
    async fn update(&self, id: i32, data: &UpdateGenre) -> AppResult<Genre>;
    /// Delete a genre; books only lose the link
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenreStore for GenresRepository {
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Genre>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres ORDER BY name, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    async fn missing_ids(&self, ids: &[i32]) -> AppResult<Vec<i32>> {
        let existing: Vec<i32> = sqlx::query_scalar("SELECT id FROM genres WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids
            .iter()
            .copied()
            .filter(|id| !existing.contains(id))
            .collect())
    }

    async fn create(&self, data: &CreateGenre) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateGenre) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = COALESCE($1, name) WHERE id = $2 RETURNING id, name",
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Genre {} not found", id)));
        }
        Ok(())
    }
}

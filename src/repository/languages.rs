//! Languages repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::language::{CreateLanguage, Language, UpdateLanguage},
};

/// Storage operations for languages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageStore: Send + Sync {
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Language>, i64)>;
    async fn get_by_id(&self, id: i32) -> AppResult<Language>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    async fn create(&self, data: &CreateLanguage) -> AppResult<Language>;
    async fn update(&self, id: i32, data: &UpdateLanguage) -> AppResult<Language>;
    /// Delete a language and, through the foreign key, every book written in it
    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct LanguagesRepository {
    pool: Pool<Postgres>,
}

impl LanguagesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LanguageStore for LanguagesRepository {
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Language>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, Language>(
            "SELECT id, name FROM languages ORDER BY name, id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Language> {
        sqlx::query_as::<_, Language>("SELECT id, name FROM languages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Language {} not found", id)))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM languages WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn create(&self, data: &CreateLanguage) -> AppResult<Language> {
        let row = sqlx::query_as::<_, Language>(
            "INSERT INTO languages (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, data: &UpdateLanguage) -> AppResult<Language> {
        sqlx::query_as::<_, Language>(
            "UPDATE languages SET name = COALESCE($1, name) WHERE id = $2 RETURNING id, name",
        )
        .bind(&data.name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Language {} not found", id)))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Language {} not found", id)));
        }
        Ok(())
    }
}

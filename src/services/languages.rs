//! Language lookup service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::language::{CreateLanguage, Language, UpdateLanguage},
    repository::LanguageStore,
};

#[derive(Clone)]
pub struct LanguagesService {
    languages: Arc<dyn LanguageStore>,
}

impl LanguagesService {
    pub fn new(languages: Arc<dyn LanguageStore>) -> Self {
        Self { languages }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Language>, i64)> {
        self.languages.list(limit, offset).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Language> {
        self.languages.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateLanguage) -> AppResult<Language> {
        data.validate()?;
        let language = self.languages.create(data).await?;
        tracing::info!("Created language id={} ({})", language.id, language);
        Ok(language)
    }

    pub async fn update(&self, id: i32, data: &UpdateLanguage) -> AppResult<Language> {
        data.validate()?;
        self.languages.update(id, data).await
    }

    /// Delete a language together with every book written in it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.languages.delete(id).await?;
        tracing::info!("Deleted language id={} and its books", id);
        Ok(())
    }
}

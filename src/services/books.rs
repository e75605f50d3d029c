//! Books service: catalog entries, their genres and their inline copies

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        book_instance::BookInstance,
    },
    repository::{AuthorStore, BookInstanceStore, BookStore, GenreStore, InstanceFilter, LanguageStore},
};

/// Upper bound on copies listed inline under a book
const INLINE_INSTANCE_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
    languages: Arc<dyn LanguageStore>,
    genres: Arc<dyn GenreStore>,
    instances: Arc<dyn BookInstanceStore>,
}

impl BooksService {
    pub fn new(
        books: Arc<dyn BookStore>,
        authors: Arc<dyn AuthorStore>,
        languages: Arc<dyn LanguageStore>,
        genres: Arc<dyn GenreStore>,
        instances: Arc<dyn BookInstanceStore>,
    ) -> Self {
        Self { books, authors, languages, genres, instances }
    }

    pub async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)> {
        self.books.list(limit, offset).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    /// Copies of a book, as shown in the inline formset of its change form
    pub async fn instances(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let filter = InstanceFilter { book_id: Some(book_id), ..Default::default() };
        let (instances, _) = self.instances.list(&filter, INLINE_INSTANCE_LIMIT, 0).await?;
        Ok(instances)
    }

    /// Create a book with its genres
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()?;

        if self.books.title_exists(&data.title, None).await? {
            return Err(AppError::Conflict("Book with this title already exists".to_string()));
        }
        self.check_references(Some(data.author_id), Some(data.language_id), Some(&data.genres))
            .await?;

        let book = self.books.create(data).await?;
        tracing::info!("Created book id={} ({})", book.id, book);
        Ok(book)
    }

    /// Update a book, its genres and its inline copies
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        data.validate()?;

        if let Some(ref title) = data.title {
            if self.books.title_exists(title, Some(id)).await? {
                return Err(AppError::Conflict("Book with this title already exists".to_string()));
            }
        }
        self.check_references(data.author_id, data.language_id, data.genres.as_deref())
            .await?;

        // New inline copies need an imprint; new rows marked for deletion are dropped
        if data
            .instances
            .iter()
            .any(|row| row.id.is_none() && !row.delete && row.imprint.is_none())
        {
            return Err(AppError::Validation("Imprint is required for a new copy".to_string()));
        }

        let book = self.books.update(id, data).await?;
        if !data.instances.is_empty() {
            tracing::info!("Applied {} inline copy change(s) to book id={}", data.instances.len(), id);
        }
        Ok(book)
    }

    /// Delete a book; its copies remain with no book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.books.delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    async fn check_references(
        &self,
        author_id: Option<i32>,
        language_id: Option<i32>,
        genre_ids: Option<&[i32]>,
    ) -> AppResult<()> {
        if let Some(author_id) = author_id {
            if !self.authors.exists(author_id).await? {
                return Err(AppError::Validation(format!("Author {} does not exist", author_id)));
            }
        }

        if let Some(language_id) = language_id {
            if !self.languages.exists(language_id).await? {
                return Err(AppError::Validation(format!(
                    "Language {} does not exist",
                    language_id
                )));
            }
        }

        if let Some(genre_ids) = genre_ids {
            let missing = self.genres.missing_ids(genre_ids).await?;
            if !missing.is_empty() {
                let ids: Vec<String> = missing.iter().map(|id| id.to_string()).collect();
                return Err(AppError::Validation(format!(
                    "Unknown genre id(s): {}",
                    ids.join(", ")
                )));
            }
        }

        Ok(())
    }
}

//! Books repository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        book_instance::{BookInstance, InlineInstanceChange},
        enums::LoanStatus,
        genre::Genre,
    },
};

/// Storage operations for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Page of books ordered by title, genres loaded
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)>;
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;
    async fn exists(&self, id: i32) -> AppResult<bool>;
    /// Whether another book already uses `title`
    async fn title_exists(&self, title: &str, exclude_id: Option<i32>) -> AppResult<bool>;
    /// Insert the book and link its genres in one transaction
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;
    /// Update fields, replace genres and apply the inline copy formset in one transaction
    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book>;
    /// Hard delete; copies keep existing with a cleared book reference
    async fn delete(&self, id: i32) -> AppResult<()>;
}

const BOOK_SELECT: &str = r#"
    SELECT b.id, b.title, b.summary, b.isbn, b.author_id, b.language_id,
           a.first_name || ' ' || a.last_name AS author_name,
           l.name AS language_name
    FROM books b
    JOIN authors a ON a.id = b.author_id
    JOIN languages l ON l.id = b.language_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load genres for the given books, keyed by book id, in assignment order
    async fn load_genres(&self, book_ids: &[i32]) -> AppResult<HashMap<i32, Vec<Genre>>> {
        let rows: Vec<(i32, i32, String)> = sqlx::query_as(
            r#"
            SELECT bg.book_id, g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = ANY($1)
            ORDER BY bg.book_id, bg.position
            "#,
        )
        .bind(book_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut genres: HashMap<i32, Vec<Genre>> = HashMap::new();
        for (book_id, id, name) in rows {
            genres.entry(book_id).or_default().push(Genre { id, name });
        }
        Ok(genres)
    }

    /// Replace all genre links of a book, keeping the given order
    async fn assign_genres(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        genre_ids: &[i32],
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&mut **tx)
            .await?;

        for (idx, genre_id) in genre_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO book_genres (book_id, genre_id, position)
                VALUES ($1, $2, $3)
                ON CONFLICT (book_id, genre_id) DO NOTHING
                "#,
            )
            .bind(book_id)
            .bind(genre_id)
            .bind((idx + 1) as i16)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Apply inline copy rows submitted with the book form
    async fn apply_inline_changes(
        tx: &mut Transaction<'_, Postgres>,
        book_id: i32,
        changes: &[InlineInstanceChange],
    ) -> AppResult<()> {
        for change in changes {
            let Some(instance_id) = change.id else {
                // A blank row marked for deletion is discarded
                if change.delete {
                    continue;
                }
                let imprint = change.imprint.as_ref().ok_or_else(|| {
                    AppError::Validation("Imprint is required for a new copy".to_string())
                })?;
                sqlx::query(
                    r#"
                    INSERT INTO book_instances (id, book_id, imprint, due_back, status)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(BookInstance::generate_id())
                .bind(book_id)
                .bind(imprint)
                .bind(change.due_back.flatten())
                .bind(change.status.unwrap_or(LoanStatus::Maintenance))
                .execute(&mut **tx)
                .await?;
                continue;
            };

            let not_found = || {
                AppError::NotFound(format!(
                    "Book instance {} not found for book {}",
                    instance_id, book_id
                ))
            };

            if change.delete {
                let result = sqlx::query("DELETE FROM book_instances WHERE id = $1 AND book_id = $2")
                    .bind(instance_id)
                    .bind(book_id)
                    .execute(&mut **tx)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(not_found());
                }
                continue;
            }

            let result = sqlx::query(
                r#"
                UPDATE book_instances SET
                    imprint = COALESCE($1, imprint),
                    due_back = CASE WHEN $2 THEN $3 ELSE due_back END,
                    status = COALESCE($4, status)
                WHERE id = $5 AND book_id = $6
                "#,
            )
            .bind(change.imprint.as_deref())
            .bind(change.due_back.is_some())
            .bind(change.due_back.flatten())
            .bind(change.status)
            .bind(instance_id)
            .bind(book_id)
            .execute(&mut **tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(not_found());
            }
        }

        Ok(())
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self, limit: i64, offset: i64) -> AppResult<(Vec<Book>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let query = format!("{} ORDER BY b.title, b.id LIMIT $1 OFFSET $2", BOOK_SELECT);
        let mut books = sqlx::query_as::<_, Book>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        let mut genres = self.load_genres(&ids).await?;
        for book in &mut books {
            book.genres = genres.remove(&book.id).unwrap_or_default();
        }

        Ok((books, total))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        let query = format!("{} WHERE b.id = $1", BOOK_SELECT);
        let mut book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        book.genres = self.load_genres(&[id]).await?.remove(&id).unwrap_or_default();

        Ok(book)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn title_exists(&self, title: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND id != $2)")
                .bind(title)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?
        };

        Ok(exists)
    }

    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, summary, isbn, author_id, language_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .bind(data.language_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::assign_genres(&mut tx, id, &data.genres).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.summary, "summary");
        add_field!(data.isbn, "isbn");
        add_field!(data.author_id, "author_id");
        add_field!(data.language_id, "language_id");

        // Nothing to set: touch the row so a missing book is still reported
        let sets = if sets.is_empty() { "id = id".to_string() } else { sets.join(", ") };
        let query = format!("UPDATE books SET {} WHERE id = ${}", sets, idx);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.title);
        bind_field!(data.summary);
        bind_field!(data.isbn);
        bind_field!(data.author_id);
        bind_field!(data.language_id);

        let result = builder.bind(id).execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        if let Some(ref genres) = data.genres {
            Self::assign_genres(&mut tx, id, genres).await?;
        }

        Self::apply_inline_changes(&mut tx, id, &data.instances).await?;

        tx.commit().await?;

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }
}

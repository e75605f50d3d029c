//! Book instances repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, CreateBookInstance, DateBounds, UpdateBookInstance},
        enums::LoanStatus,
    },
};

/// Resolved changelist filters for book instances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceFilter {
    pub status: Option<LoanStatus>,
    pub due_back: Option<DateBounds>,
    pub book_id: Option<i32>,
}

/// Storage operations for book instances
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    /// Page of instances ordered by due date (undated last)
    async fn list(
        &self,
        filter: &InstanceFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<BookInstance>, i64)>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance>;
    /// Insert a new copy under the given identity
    async fn create(&self, id: Uuid, data: &CreateBookInstance) -> AppResult<BookInstance>;
    async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstance>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

const INSTANCE_SELECT: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.due_back, bi.status, b.title AS book_title
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// WHERE clause and its parameter count for `filter`.
///
/// Parameters are numbered from `$1` in the order status, date bounds,
/// book id; `bind_filter!` binds them in the same order.
fn filter_clause(filter: &InstanceFilter) -> (String, usize) {
    let mut conditions = vec!["1=1".to_string()];
    let mut idx = 1;

    if filter.status.is_some() {
        conditions.push(format!("bi.status = ${}", idx));
        idx += 1;
    }

    match filter.due_back {
        Some(DateBounds::Range { .. }) => {
            conditions.push(format!("bi.due_back >= ${} AND bi.due_back < ${}", idx, idx + 1));
            idx += 2;
        }
        Some(DateBounds::IsNull) => conditions.push("bi.due_back IS NULL".to_string()),
        Some(DateBounds::IsNotNull) => conditions.push("bi.due_back IS NOT NULL".to_string()),
        None => {}
    }

    if filter.book_id.is_some() {
        conditions.push(format!("bi.book_id = ${}", idx));
        idx += 1;
    }

    (conditions.join(" AND "), idx - 1)
}

macro_rules! bind_filter {
    ($builder:expr, $filter:expr) => {{
        let mut builder = $builder;
        if let Some(status) = $filter.status {
            builder = builder.bind(status);
        }
        if let Some(DateBounds::Range { from, until }) = $filter.due_back {
            builder = builder.bind(from).bind(until);
        }
        if let Some(book_id) = $filter.book_id {
            builder = builder.bind(book_id);
        }
        builder
    }};
}

#[async_trait]
impl BookInstanceStore for BookInstancesRepository {
    async fn list(
        &self,
        filter: &InstanceFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        let (where_clause, nb_params) = filter_clause(filter);

        let count_query = format!("SELECT COUNT(*) FROM book_instances bi WHERE {}", where_clause);
        let total: i64 = bind_filter!(sqlx::query_scalar::<_, i64>(&count_query), filter)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "{} WHERE {} ORDER BY bi.due_back ASC, bi.id LIMIT ${} OFFSET ${}",
            INSTANCE_SELECT,
            where_clause,
            nb_params + 1,
            nb_params + 2
        );
        let rows = bind_filter!(sqlx::query_as::<_, BookInstance>(&select_query), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        let query = format!("{} WHERE bi.id = $1", INSTANCE_SELECT);
        sqlx::query_as::<_, BookInstance>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book instance {} not found", id)))
    }

    async fn create(&self, id: Uuid, data: &CreateBookInstance) -> AppResult<BookInstance> {
        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, due_back, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(id)
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.due_back)
        .bind(data.status)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstance> {
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

        add_field!(data.book_id, "book_id");
        add_field!(data.imprint, "imprint");
        add_field!(data.due_back, "due_back");
        add_field!(data.status, "status");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE book_instances SET {} WHERE id = ${}", sets.join(", "), idx);

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.book_id);
        bind_field!(data.imprint);
        bind_field!(data.due_back);
        bind_field!(data.status);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }

        self.get_by_id(id).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book instance {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_filter_clause_empty() {
        let (clause, nb) = filter_clause(&InstanceFilter::default());
        assert_eq!(clause, "1=1");
        assert_eq!(nb, 0);
    }

    #[test]
    fn test_filter_clause_numbers_parameters_in_bind_order() {
        let filter = InstanceFilter {
            status: Some(LoanStatus::OnLoan),
            due_back: Some(DateBounds::Range {
                from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                until: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            }),
            book_id: Some(3),
        };
        let (clause, nb) = filter_clause(&filter);
        assert_eq!(
            clause,
            "1=1 AND bi.status = $1 AND bi.due_back >= $2 AND bi.due_back < $3 AND bi.book_id = $4"
        );
        assert_eq!(nb, 4);
    }

    #[test]
    fn test_filter_clause_null_tests_take_no_parameter() {
        let filter = InstanceFilter {
            status: None,
            due_back: Some(DateBounds::IsNull),
            book_id: Some(9),
        };
        let (clause, nb) = filter_clause(&filter);
        assert_eq!(clause, "1=1 AND bi.due_back IS NULL AND bi.book_id = $1");
        assert_eq!(nb, 1);
    }
}

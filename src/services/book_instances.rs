//! Book instances service: physical copies and their loan status

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstance, BookInstanceQuery, CreateBookInstance, UpdateBookInstance},
        enums::LoanStatus,
    },
    repository::{BookInstanceStore, BookStore, InstanceFilter},
};

#[derive(Clone)]
pub struct BookInstancesService {
    instances: Arc<dyn BookInstanceStore>,
    books: Arc<dyn BookStore>,
}

/// Store filter for a changelist query, with date choices resolved against `today`
pub fn resolve_filter(query: &BookInstanceQuery, today: NaiveDate) -> InstanceFilter {
    InstanceFilter {
        status: query.status,
        due_back: query.due_back.map(|f| f.bounds(today)),
        book_id: query.book_id,
    }
}

fn warn_missing_due_back(id: Uuid, status: LoanStatus, due_back: Option<NaiveDate>) {
    if status.expects_due_back() && due_back.is_none() {
        tracing::warn!("Book instance {} is '{}' without a due date", id, status.label());
    }
}

impl BookInstancesService {
    pub fn new(instances: Arc<dyn BookInstanceStore>, books: Arc<dyn BookStore>) -> Self {
        Self { instances, books }
    }

    /// Filtered page of copies, ordered by due date
    pub async fn list(
        &self,
        query: &BookInstanceQuery,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<BookInstance>, i64)> {
        let filter = resolve_filter(query, chrono::Local::now().date_naive());
        self.instances.list(&filter, limit, offset).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BookInstance> {
        self.instances.get_by_id(id).await
    }

    /// Label of a copy; fails for copies whose book was deleted
    pub async fn describe(&self, id: Uuid) -> AppResult<String> {
        self.instances.get_by_id(id).await?.describe()
    }

    /// Create a copy under a freshly generated id
    pub async fn create(&self, data: &CreateBookInstance) -> AppResult<BookInstance> {
        data.validate()?;
        if let Some(book_id) = data.book_id {
            self.check_book(book_id).await?;
        }

        let id = BookInstance::generate_id();
        warn_missing_due_back(id, data.status, data.due_back);

        let instance = self.instances.create(id, data).await?;
        tracing::info!("Created book instance {} (status {})", instance.id, instance.status.code());
        Ok(instance)
    }

    pub async fn update(&self, id: Uuid, data: &UpdateBookInstance) -> AppResult<BookInstance> {
        data.validate()?;
        if let Some(Some(book_id)) = data.book_id {
            self.check_book(book_id).await?;
        }

        let instance = self.instances.update(id, data).await?;
        warn_missing_due_back(instance.id, instance.status, instance.due_back);
        Ok(instance)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.instances.delete(id).await?;
        tracing::info!("Deleted book instance {}", id);
        Ok(())
    }

    async fn check_book(&self, book_id: i32) -> AppResult<()> {
        if !self.books.exists(book_id).await? {
            return Err(AppError::Validation(format!("Book {} does not exist", book_id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::book_instance::{DateBounds, DueBackFilter},
        repository::{book_instances::MockBookInstanceStore, books::MockBookStore},
    };

    fn copy(id: Uuid, data: &CreateBookInstance) -> BookInstance {
        BookInstance {
            id,
            book_id: data.book_id,
            imprint: data.imprint.clone(),
            due_back: data.due_back,
            status: data.status,
            book_title: data.book_id.map(|_| "Sample".to_string()),
        }
    }

    fn new_copy(book_id: Option<i32>) -> CreateBookInstance {
        CreateBookInstance {
            book_id,
            imprint: "Penguin, 1999".to_string(),
            due_back: None,
            status: LoanStatus::default(),
        }
    }

    #[test]
    fn test_resolve_filter() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let query = BookInstanceQuery {
            status: Some(LoanStatus::OnLoan),
            due_back: Some(DueBackFilter::NoDate),
            book_id: Some(4),
            ..Default::default()
        };
        let filter = resolve_filter(&query, today);
        assert_eq!(filter.status, Some(LoanStatus::OnLoan));
        assert_eq!(filter.due_back, Some(DateBounds::IsNull));
        assert_eq!(filter.book_id, Some(4));

        assert_eq!(resolve_filter(&BookInstanceQuery::default(), today), InstanceFilter::default());
    }

    #[tokio::test]
    async fn test_create_generates_distinct_ids() {
        let mut instances = MockBookInstanceStore::new();
        instances.expect_create().times(2).returning(|id, data| Ok(copy(id, data)));
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(true));

        let service = BookInstancesService::new(Arc::new(instances), Arc::new(books));
        let first = service.create(&new_copy(Some(1))).await.unwrap();
        let second = service.create(&new_copy(Some(1))).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.status, LoanStatus::Maintenance);
    }

    #[tokio::test]
    async fn test_create_without_book() {
        let mut instances = MockBookInstanceStore::new();
        instances.expect_create().times(1).returning(|id, data| Ok(copy(id, data)));
        let mut books = MockBookStore::new();
        books.expect_exists().never();

        let service = BookInstancesService::new(Arc::new(instances), Arc::new(books));
        let instance = service.create(&new_copy(None)).await.unwrap();
        assert!(instance.is_orphaned());
    }

    #[tokio::test]
    async fn test_create_for_unknown_book_is_rejected() {
        let mut instances = MockBookInstanceStore::new();
        instances.expect_create().never();
        let mut books = MockBookStore::new();
        books.expect_exists().returning(|_| Ok(false));

        let service = BookInstancesService::new(Arc::new(instances), Arc::new(books));
        let result = service.create(&new_copy(Some(77))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_describe_orphaned_copy() {
        let id = BookInstance::generate_id();
        let mut instances = MockBookInstanceStore::new();
        instances
            .expect_get_by_id()
            .returning(|id| Ok(copy(id, &new_copy(None))));

        let service = BookInstancesService::new(Arc::new(instances), Arc::new(MockBookStore::new()));
        assert!(matches!(service.describe(id).await, Err(AppError::BusinessRule(_))));
    }
}

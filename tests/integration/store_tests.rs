//! Store tests against a fresh database per test

use chrono::NaiveDate;
use sqlx::PgPool;

use catalog_server::{
    models::{
        author::CreateAuthor,
        book::{CreateBook, UpdateBook},
        book_instance::{CreateBookInstance, DateBounds, InlineInstanceChange},
        genre::CreateGenre,
        language::CreateLanguage,
        BookInstance, LoanStatus,
    },
    repository::{
        AuthorStore, BookInstanceStore, BookStore, GenreStore, InstanceFilter, LanguageStore,
        Repository,
    },
    AppError,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Author Jane Doe, language English and genres Fiction, Poetry, History, Science
struct Fixture {
    repo: Repository,
    author_id: i32,
    language_id: i32,
    genre_ids: Vec<i32>,
}

impl Fixture {
    async fn new(pool: PgPool) -> Self {
        let repo = Repository::new(pool);
        let author = repo
            .authors
            .create(&CreateAuthor {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                date_of_birth: date(1950, 1, 1),
                date_of_death: None,
            })
            .await
            .unwrap();
        let language = repo
            .languages
            .create(&CreateLanguage { name: "English".to_string() })
            .await
            .unwrap();

        let mut genre_ids = Vec::new();
        for name in ["Fiction", "Poetry", "History", "Science"] {
            let genre = repo.genres.create(&CreateGenre { name: name.to_string() }).await.unwrap();
            genre_ids.push(genre.id);
        }

        Self { repo, author_id: author.id, language_id: language.id, genre_ids }
    }

    fn book(&self, title: &str, genres: Vec<i32>) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            summary: "A sample book".to_string(),
            isbn: "9780000000000".to_string(),
            author_id: self.author_id,
            language_id: self.language_id,
            genres,
        }
    }

    async fn copy(&self, book_id: Option<i32>, due_back: Option<NaiveDate>) -> BookInstance {
        self.repo
            .book_instances
            .create(
                BookInstance::generate_id(),
                &CreateBookInstance {
                    book_id,
                    imprint: "Penguin, 1999".to_string(),
                    due_back,
                    status: LoanStatus::default(),
                },
            )
            .await
            .unwrap()
    }
}

#[sqlx::test]
#[ignore]
async fn test_sample_book(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let book = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();

    assert!(book.absolute_url().contains(&book.id.to_string()));
    assert_eq!(book.display_genre(), "Fiction");
    assert_eq!(book.author_name.as_deref(), Some("Jane Doe"));
    assert_eq!(book.language_name.as_deref(), Some("English"));
}

#[sqlx::test]
#[ignore]
async fn test_duplicate_title_is_a_conflict(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();

    assert!(fx.repo.books.title_exists("Sample", None).await.unwrap());
    let result = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[1]])).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[sqlx::test]
#[ignore]
async fn test_display_genre_keeps_assignment_order(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let ids = &fx.genre_ids;
    let book = fx
        .repo
        .books
        .create(&fx.book("Sample", vec![ids[3], ids[0], ids[2], ids[1]]))
        .await
        .unwrap();

    assert_eq!(book.genres.len(), 4);
    assert_eq!(book.display_genre(), "Science, Fiction, History");
}

#[sqlx::test]
#[ignore]
async fn test_deleting_author_removes_books(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let book = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();

    fx.repo.authors.delete(fx.author_id).await.unwrap();

    assert!(!fx.repo.books.exists(book.id).await.unwrap());
}

#[sqlx::test]
#[ignore]
async fn test_deleting_language_removes_books(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let book = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();

    fx.repo.languages.delete(fx.language_id).await.unwrap();

    assert!(!fx.repo.books.exists(book.id).await.unwrap());
}

#[sqlx::test]
#[ignore]
async fn test_deleting_book_keeps_copies(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let book = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();
    let copy = fx.copy(Some(book.id), None).await;

    fx.repo.books.delete(book.id).await.unwrap();

    let copy = fx.repo.book_instances.get_by_id(copy.id).await.unwrap();
    assert!(copy.is_orphaned());
    assert!(matches!(copy.describe(), Err(AppError::BusinessRule(_))));
}

#[sqlx::test]
#[ignore]
async fn test_deleting_genre_keeps_books(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let ids = &fx.genre_ids;
    let book = fx.repo.books.create(&fx.book("Sample", vec![ids[0], ids[1]])).await.unwrap();

    fx.repo.genres.delete(ids[0]).await.unwrap();

    let book = fx.repo.books.get_by_id(book.id).await.unwrap();
    assert_eq!(book.display_genre(), "Poetry");
}

#[sqlx::test]
#[ignore]
async fn test_invalid_status_rejected_by_database(pool: PgPool) {
    let fx = Fixture::new(pool.clone()).await;
    let copy = fx.copy(None, None).await;

    let result = sqlx::query("UPDATE book_instances SET status = 'x' WHERE id = $1")
        .bind(copy.id)
        .execute(&pool)
        .await;
    assert!(result.is_err());
}

#[sqlx::test]
#[ignore]
async fn test_copies_ordered_by_due_date(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let late = fx.copy(None, Some(date(2024, 6, 1))).await;
    let undated = fx.copy(None, None).await;
    let early = fx.copy(None, Some(date(2024, 1, 1))).await;

    let (copies, total) = fx
        .repo
        .book_instances
        .list(&InstanceFilter::default(), 100, 0)
        .await
        .unwrap();
    assert_eq!(total, 3);
    let ids: Vec<_> = copies.iter().map(|c| c.id).collect();
    assert_eq!(ids, [early.id, late.id, undated.id]);

    let filter = InstanceFilter { due_back: Some(DateBounds::IsNull), ..Default::default() };
    let (copies, total) = fx.repo.book_instances.list(&filter, 100, 0).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(copies[0].id, undated.id);
}

#[sqlx::test]
#[ignore]
async fn test_books_and_authors_ordering(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    fx.repo
        .authors
        .create(&CreateAuthor {
            first_name: "Albert".to_string(),
            last_name: "Zola".to_string(),
            date_of_birth: date(1900, 1, 1),
            date_of_death: None,
        })
        .await
        .unwrap();
    for title in ["Zebra", "Apple", "Mango"] {
        fx.repo.books.create(&fx.book(title, vec![fx.genre_ids[0]])).await.unwrap();
    }

    let (books, _) = fx.repo.books.list(100, 0).await.unwrap();
    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Apple", "Mango", "Zebra"]);

    let (authors, total) = fx.repo.authors.list(100, 0).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(authors[0].first_name, "Albert");
}

#[sqlx::test]
#[ignore]
async fn test_inline_copy_formset(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let book = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();
    let kept = fx.copy(Some(book.id), None).await;
    let removed = fx.copy(Some(book.id), None).await;

    let update = UpdateBook {
        instances: vec![
            InlineInstanceChange {
                imprint: Some("Gallimard, 2001".to_string()),
                ..Default::default()
            },
            InlineInstanceChange {
                id: Some(kept.id),
                status: Some(LoanStatus::OnLoan),
                due_back: Some(Some(date(2024, 2, 1))),
                ..Default::default()
            },
            InlineInstanceChange { id: Some(removed.id), delete: true, ..Default::default() },
            InlineInstanceChange {
                imprint: Some("Discarded".to_string()),
                delete: true,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    fx.repo.books.update(book.id, &update).await.unwrap();

    let filter = InstanceFilter { book_id: Some(book.id), ..Default::default() };
    let (copies, total) = fx.repo.book_instances.list(&filter, 100, 0).await.unwrap();
    assert_eq!(total, 2);

    let kept = copies.iter().find(|c| c.id == kept.id).unwrap();
    assert_eq!(kept.status, LoanStatus::OnLoan);
    assert_eq!(kept.due_back, Some(date(2024, 2, 1)));
    assert!(copies.iter().any(|c| c.imprint == "Gallimard, 2001"));
    assert!(copies.iter().all(|c| c.id != removed.id));
    assert!(copies.iter().all(|c| c.imprint != "Discarded"));
}

#[sqlx::test]
#[ignore]
async fn test_inline_change_of_foreign_copy_rolls_back(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let book = fx.repo.books.create(&fx.book("Sample", vec![fx.genre_ids[0]])).await.unwrap();
    let stranger = fx.copy(None, None).await;

    let update = UpdateBook {
        title: Some("Renamed".to_string()),
        instances: vec![InlineInstanceChange { id: Some(stranger.id), delete: true, ..Default::default() }],
        ..Default::default()
    };
    let result = fx.repo.books.update(book.id, &update).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert_eq!(fx.repo.books.get_by_id(book.id).await.unwrap().title, "Sample");
    assert!(fx.repo.book_instances.get_by_id(stranger.id).await.is_ok());
}

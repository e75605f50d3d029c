//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod languages;

use std::sync::Arc;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
    pub genres: genres::GenresService,
    pub languages: languages::LanguagesService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let authors = Arc::new(repository.authors.clone());
        let books = Arc::new(repository.books.clone());
        let book_instances = Arc::new(repository.book_instances.clone());
        let genres = Arc::new(repository.genres.clone());
        let languages = Arc::new(repository.languages.clone());

        Self {
            authors: authors::AuthorsService::new(authors.clone()),
            books: books::BooksService::new(
                books.clone(),
                authors,
                languages.clone(),
                genres.clone(),
                book_instances.clone(),
            ),
            book_instances: book_instances::BookInstancesService::new(book_instances, books),
            genres: genres::GenresService::new(genres),
            languages: languages::LanguagesService::new(languages),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

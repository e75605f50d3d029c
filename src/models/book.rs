//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book_instance::InlineInstanceChange;
use super::genre::Genre;

/// Number of genres shown by [`Book::display_genre`]
pub const DISPLAY_GENRE_LIMIT: usize = 3;

/// Catalog entry for a title
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
    pub language_id: i32,
    // Computed fields (populated when queried with JOINs, None otherwise)
    #[sqlx(default)]
    #[serde(default)]
    pub author_name: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub language_name: Option<String>,
    // Relations (loaded separately), in assignment order
    #[sqlx(skip)]
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Book {
    /// First genre names joined by commas, for compact listings
    pub fn display_genre(&self) -> String {
        self.genres
            .iter()
            .take(DISPLAY_GENRE_LIMIT)
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Canonical path of the book's detail screen
    pub fn absolute_url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: i32) -> String {
    format!("/admin/books/{}", id)
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "Summary must be 1 to 1000 characters"))]
    pub summary: String,
    #[validate(length(min = 1, max = 13, message = "ISBN must be 1 to 13 characters"))]
    pub isbn: String,
    pub author_id: i32,
    pub language_id: i32,
    /// Genre ids in display order
    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Vec<i32>,
}

/// Update book request
///
/// `genres`, when present, replaces the assigned genres. `instances` is the
/// inline formset for the book's copies.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title must be 1 to 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Summary must be 1 to 1000 characters"))]
    pub summary: Option<String>,
    #[validate(length(min = 1, max = 13, message = "ISBN must be 1 to 13 characters"))]
    pub isbn: Option<String>,
    pub author_id: Option<i32>,
    pub language_id: Option<i32>,
    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Option<Vec<i32>>,
    #[serde(default)]
    #[validate(nested)]
    pub instances: Vec<InlineInstanceChange>,
}

//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod enums;
pub mod genre;
pub mod language;

use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

// Re-export commonly used types
pub use author::Author;
pub use book::Book;
pub use book_instance::BookInstance;
pub use enums::LoanStatus;
pub use genre::Genre;
pub use language::Language;

/// Page selection for changelists
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Resolve to `(page, per_page, offset)`, clamping to sane values
    pub fn resolve(&self, default_per_page: i64) -> (i64, i64, i64) {
        let per_page = self.per_page.unwrap_or(default_per_page).clamp(1, 1000);
        // Offset must fit in an i64
        let page = self.page.unwrap_or(1).clamp(1, i64::MAX / per_page);
        (page, per_page, (page - 1) * per_page)
    }
}

/// Deserialize a field where `null` differs from an absent key.
///
/// Use with `#[serde(default)]`: absent yields `None`, `null` yields
/// `Some(None)`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

//! Book instance (physical copy) model and related types

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::LoanStatus;
use crate::error::{AppError, AppResult};

/// A specific copy of a book that can be borrowed
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Unique id for this copy across the whole library
    pub id: Uuid,
    /// None once the book has been deleted
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    // Computed field (populated when queried with JOINs, None otherwise)
    #[sqlx(default)]
    #[serde(default)]
    pub book_title: Option<String>,
}

impl BookInstance {
    /// Fresh random identity for a new copy
    pub fn generate_id() -> Uuid {
        Uuid::new_v4()
    }

    pub fn is_orphaned(&self) -> bool {
        self.book_id.is_none()
    }

    /// Human-readable label: `"{id} ({book title})"`.
    ///
    /// Only defined while the copy still references a book.
    pub fn describe(&self) -> AppResult<String> {
        if self.is_orphaned() || self.book_title.is_none() {
            return Err(AppError::BusinessRule(format!(
                "Book instance {} has no book",
                self.id
            )));
        }
        Ok(self.to_string())
    }
}

/// `"{id} ({book title})"`, or the id alone once the book is gone
impl std::fmt::Display for BookInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.book_id, &self.book_title) {
            (Some(_), Some(title)) => write!(f, "{} ({})", self.id, title),
            _ => write!(f, "{}", self.id),
        }
    }
}

/// Create book instance request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1 to 200 characters"))]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    #[serde(default)]
    pub status: LoanStatus,
}

/// Update book instance request
///
/// `book_id` and `due_back` use a double option: absent keeps the stored
/// value, `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBookInstance {
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<i32>)]
    pub book_id: Option<Option<i32>>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1 to 200 characters"))]
    pub imprint: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_back: Option<Option<NaiveDate>>,
    pub status: Option<LoanStatus>,
}

/// One row of the inline copy formset submitted with a book.
///
/// Rows without `id` are added to the book, rows with `id` are changed, or
/// removed when `delete` is set.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct InlineInstanceChange {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1 to 200 characters"))]
    pub imprint: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_back: Option<Option<NaiveDate>>,
    pub status: Option<LoanStatus>,
    #[serde(default)]
    pub delete: bool,
}

/// Date filter choices for `due_back` on the copy changelist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DueBackFilter {
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    ThisMonth,
    ThisYear,
    HasDate,
    NoDate,
}

/// Inclusive/exclusive date bounds or a null test, as applied by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBounds {
    /// `from <= due_back < until`
    Range { from: NaiveDate, until: NaiveDate },
    IsNull,
    IsNotNull,
}

impl DueBackFilter {
    pub const ALL: [DueBackFilter; 6] = [
        DueBackFilter::Today,
        DueBackFilter::Past7Days,
        DueBackFilter::ThisMonth,
        DueBackFilter::ThisYear,
        DueBackFilter::HasDate,
        DueBackFilter::NoDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DueBackFilter::Today => "Today",
            DueBackFilter::Past7Days => "Past 7 days",
            DueBackFilter::ThisMonth => "This month",
            DueBackFilter::ThisYear => "This year",
            DueBackFilter::HasDate => "Has date",
            DueBackFilter::NoDate => "No date",
        }
    }

    pub fn query_value(&self) -> &'static str {
        match self {
            DueBackFilter::Today => "today",
            DueBackFilter::Past7Days => "past_7_days",
            DueBackFilter::ThisMonth => "this_month",
            DueBackFilter::ThisYear => "this_year",
            DueBackFilter::HasDate => "has_date",
            DueBackFilter::NoDate => "no_date",
        }
    }

    /// Resolve the filter against `today`
    pub fn bounds(&self, today: NaiveDate) -> DateBounds {
        let tomorrow = today + Duration::days(1);
        match self {
            DueBackFilter::Today => DateBounds::Range { from: today, until: tomorrow },
            DueBackFilter::Past7Days => DateBounds::Range {
                from: today - Duration::days(7),
                until: tomorrow,
            },
            DueBackFilter::ThisMonth => {
                let from = today.with_day(1).unwrap_or(today);
                let until = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                }
                .unwrap_or(tomorrow);
                DateBounds::Range { from, until }
            }
            DueBackFilter::ThisYear => {
                let from = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let until = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap_or(tomorrow);
                DateBounds::Range { from, until }
            }
            DueBackFilter::HasDate => DateBounds::IsNotNull,
            DueBackFilter::NoDate => DateBounds::IsNull,
        }
    }
}

/// Changelist query for book instances
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookInstanceQuery {
    pub status: Option<LoanStatus>,
    pub due_back: Option<DueBackFilter>,
    pub book_id: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

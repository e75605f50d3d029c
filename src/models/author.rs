//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Full author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    /// None while the author is living
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// True when a death date is recorded before the birth date.
    /// Such records are accepted; callers may only warn about them.
    pub fn has_inverted_dates(&self) -> bool {
        inverted_dates(self.date_of_birth, self.date_of_death)
    }
}

pub(crate) fn inverted_dates(born: NaiveDate, died: Option<NaiveDate>) -> bool {
    died.is_some_and(|died| died < born)
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, max = 255, message = "First name must be 1 to 255 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1 to 255 characters"))]
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

/// Update author request
///
/// `date_of_death` uses a double option: absent keeps the stored value,
/// `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, max = 255, message = "First name must be 1 to 255 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Last name must be 1 to 255 characters"))]
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub date_of_death: Option<Option<NaiveDate>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Author {
        Author {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            date_of_death: None,
        }
    }

    #[test]
    fn test_display_first_then_last() {
        assert_eq!(jane().to_string(), "Jane Doe");
    }

    #[test]
    fn test_inverted_dates() {
        let mut author = jane();
        assert!(!author.has_inverted_dates());

        author.date_of_death = NaiveDate::from_ymd_opt(1949, 12, 31);
        assert!(author.has_inverted_dates());

        author.date_of_death = NaiveDate::from_ymd_opt(2020, 6, 1);
        assert!(!author.has_inverted_dates());
    }

    #[test]
    fn test_update_death_date_presence() {
        let keep: UpdateAuthor = serde_json::from_str(r#"{"first_name": "Janet"}"#).unwrap();
        assert_eq!(keep.date_of_death, None);

        let clear: UpdateAuthor = serde_json::from_str(r#"{"date_of_death": null}"#).unwrap();
        assert_eq!(clear.date_of_death, Some(None));

        let set: UpdateAuthor = serde_json::from_str(r#"{"date_of_death": "2001-02-03"}"#).unwrap();
        assert_eq!(set.date_of_death, Some(NaiveDate::from_ymd_opt(2001, 2, 3)));
    }

    #[test]
    fn test_create_requires_names() {
        let data = CreateAuthor {
            first_name: String::new(),
            last_name: "Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1950, 1, 1).unwrap(),
            date_of_death: None,
        };
        assert!(data.validate().is_err());
    }
}

//! Field access for admin rendering

use std::fmt::Display;

use chrono::NaiveDate;
use serde_json::{json, Value};

use super::DISPLAY_COLUMN;
use crate::models::{Author, Book, BookInstance, Genre, Language};

/// A model the admin can render.
///
/// `field` returns `None` for names the model does not know and
/// `Some(Value::Null)` for known but empty values.
pub trait AdminModel: Display {
    /// Primary key as it appears in admin URLs
    fn pk(&self) -> String;

    /// Display value of a column or form field
    fn field(&self, name: &str) -> Option<Value>;

    /// Editable value of a form field, defaults to the display value
    fn form_value(&self, name: &str) -> Option<Value> {
        self.field(name)
    }
}

/// Display value of a changelist column, including the string representation
pub fn column_value<M: AdminModel + ?Sized>(obj: &M, name: &str) -> Option<Value> {
    if name == DISPLAY_COLUMN {
        return Some(Value::String(obj.to_string()));
    }
    obj.field(name)
}

fn date(value: NaiveDate) -> Value {
    Value::String(value.format("%Y-%m-%d").to_string())
}

fn opt<T, F: FnOnce(T) -> Value>(value: Option<T>, f: F) -> Value {
    value.map(f).unwrap_or(Value::Null)
}

impl AdminModel for Language {
    fn pk(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            _ => None,
        }
    }
}

impl AdminModel for Genre {
    fn pk(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            "name" => Some(json!(self.name)),
            _ => None,
        }
    }
}

impl AdminModel for Author {
    fn pk(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            "first_name" => Some(json!(self.first_name)),
            "last_name" => Some(json!(self.last_name)),
            "date_of_birth" => Some(date(self.date_of_birth)),
            "date_of_death" => Some(opt(self.date_of_death, date)),
            _ => None,
        }
    }
}

impl AdminModel for Book {
    fn pk(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            "title" => Some(json!(self.title)),
            "summary" => Some(json!(self.summary)),
            "isbn" => Some(json!(self.isbn)),
            "author" => Some(opt(self.author_name.clone(), Value::String)),
            "language" => Some(opt(self.language_name.clone(), Value::String)),
            "display_genre" => Some(json!(self.display_genre())),
            "genre" => Some(json!(self.genres.iter().map(|g| &g.name).collect::<Vec<_>>())),
            _ => None,
        }
    }

    fn form_value(&self, name: &str) -> Option<Value> {
        match name {
            "author" => Some(json!(self.author_id)),
            "language" => Some(json!(self.language_id)),
            "genre" => Some(json!(self.genres.iter().map(|g| g.id).collect::<Vec<_>>())),
            other => self.field(other),
        }
    }
}

impl AdminModel for BookInstance {
    fn pk(&self) -> String {
        self.id.to_string()
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(json!(self.id)),
            // Orphaned copies have no book title to show
            "book" => Some(opt(self.book_title.clone(), Value::String)),
            "imprint" => Some(json!(self.imprint)),
            "due_back" => Some(opt(self.due_back, date)),
            "status" => Some(json!(self.status.label())),
            _ => None,
        }
    }

    fn form_value(&self, name: &str) -> Option<Value> {
        match name {
            "book" => Some(opt(self.book_id, |id| json!(id))),
            "status" => Some(json!(self.status.code())),
            other => self.field(other),
        }
    }
}

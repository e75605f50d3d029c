//! Admin presentation layer
//!
//! Each catalog entity is registered with a static [`ModelAdmin`] describing
//! its changelist columns, default ordering, filters, form layout and inline
//! editors. [`render`] turns model values into the JSON screens served under
//! `/admin`.

pub mod fields;
pub mod render;

use serde::Serialize;

pub use fields::AdminModel;
pub use render::{ChangeForm, ChangeList};

/// Column name standing for the object's string representation
pub const DISPLAY_COLUMN: &str = "__str__";

/// Rendered in place of an empty value
pub const EMPTY_VALUE: &str = "-";

/// A group of form fields; each row is laid out on one line
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Fieldset {
    pub name: Option<&'static str>,
    pub rows: &'static [&'static [&'static str]],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineStyle {
    Tabular,
    Stacked,
}

/// Related objects edited on the parent's change form
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InlineAdmin {
    /// Slug of the related model
    pub model: &'static str,
    pub style: InlineStyle,
    /// Blank rows offered for new objects
    pub extra: usize,
    /// Fields shown per row, the parent reference excluded
    pub fields: &'static [&'static str],
}

/// Admin registration of one model
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModelAdmin {
    /// Path segment under `/admin`
    pub slug: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: &'static [&'static str],
    /// Default ordering; a leading `-` means descending
    pub ordering: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    pub fieldsets: &'static [Fieldset],
    pub inlines: &'static [InlineAdmin],
}

impl ModelAdmin {
    pub fn list_url(&self) -> String {
        format!("/admin/{}", self.slug)
    }

    pub fn change_url(&self, id: &str) -> String {
        format!("/admin/{}/{}", self.slug, id)
    }

    /// Every field laid out in the form, in order
    pub fn form_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fieldsets
            .iter()
            .flat_map(|fs| fs.rows.iter())
            .flat_map(|row| row.iter().copied())
    }

    /// Header shown for a changelist column or form field
    pub fn label(&self, name: &str) -> String {
        match name {
            DISPLAY_COLUMN => capitalize(self.verbose_name),
            "display_genre" => "Genre".to_string(),
            "id" => "ID".to_string(),
            other => capitalize(&other.replace('_', " ")),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub static AUTHOR_ADMIN: ModelAdmin = ModelAdmin {
    slug: "authors",
    verbose_name: "author",
    verbose_name_plural: "authors",
    list_display: &["first_name", "last_name", "date_of_birth", "date_of_death"],
    ordering: &["first_name"],
    list_filter: &[],
    fieldsets: &[Fieldset {
        name: None,
        rows: &[&["first_name", "last_name"], &["date_of_birth", "date_of_death"]],
    }],
    inlines: &[],
};

pub static BOOK_ADMIN: ModelAdmin = ModelAdmin {
    slug: "books",
    verbose_name: "book",
    verbose_name_plural: "books",
    list_display: &["title", "author", "display_genre", "language"],
    ordering: &["title"],
    list_filter: &[],
    fieldsets: &[Fieldset {
        name: None,
        rows: &[&["title"], &["author"], &["summary"], &["isbn"], &["genre"], &["language"]],
    }],
    inlines: &[InlineAdmin {
        model: "book-instances",
        style: InlineStyle::Tabular,
        extra: 0,
        fields: &["imprint", "due_back", "status", "id"],
    }],
};

pub static BOOK_INSTANCE_ADMIN: ModelAdmin = ModelAdmin {
    slug: "book-instances",
    verbose_name: "book instance",
    verbose_name_plural: "book instances",
    list_display: &["book", "status", "due_back"],
    ordering: &["due_back"],
    list_filter: &["status", "due_back"],
    fieldsets: &[
        Fieldset {
            name: Some("Book information"),
            rows: &[&["book"], &["imprint"], &["id"]],
        },
        Fieldset {
            name: Some("Availability"),
            rows: &[&["status"], &["due_back"]],
        },
    ],
    inlines: &[],
};

pub static GENRE_ADMIN: ModelAdmin = ModelAdmin {
    slug: "genres",
    verbose_name: "genre",
    verbose_name_plural: "genres",
    list_display: &[DISPLAY_COLUMN],
    ordering: &["name"],
    list_filter: &[],
    fieldsets: &[Fieldset { name: None, rows: &[&["name"]] }],
    inlines: &[],
};

pub static LANGUAGE_ADMIN: ModelAdmin = ModelAdmin {
    slug: "languages",
    verbose_name: "language",
    verbose_name_plural: "languages",
    list_display: &[DISPLAY_COLUMN],
    ordering: &["name"],
    list_filter: &[],
    fieldsets: &[Fieldset { name: None, rows: &[&["name"]] }],
    inlines: &[],
};

/// Registered models, in index order
pub static REGISTRY: [&ModelAdmin; 5] = [
    &AUTHOR_ADMIN,
    &BOOK_ADMIN,
    &BOOK_INSTANCE_ADMIN,
    &GENRE_ADMIN,
    &LANGUAGE_ADMIN,
];

/// Find a registration by its URL slug
pub fn lookup(slug: &str) -> Option<&'static ModelAdmin> {
    REGISTRY.iter().copied().find(|admin| admin.slug == slug)
}

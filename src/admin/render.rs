//! Admin screens: changelists, change forms and the index

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::{
    fields::{column_value, AdminModel},
    InlineAdmin, InlineStyle, ModelAdmin, EMPTY_VALUE, REGISTRY,
};
use crate::models::{
    book_instance::{BookInstanceQuery, DueBackFilter},
    LoanStatus,
};

/// Changelist column header
#[derive(Debug, Serialize, ToSchema)]
pub struct Column {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeListRow {
    pub id: String,
    /// Change form of this object
    pub url: String,
    /// Rendered values keyed by column name, in column order
    #[schema(value_type = Object)]
    pub values: IndexMap<String, Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterChoice {
    /// Query value, `None` for the "All" choice
    pub value: Option<String>,
    pub label: String,
    pub selected: bool,
}

/// Sidebar filter of a changelist
#[derive(Debug, Serialize, ToSchema)]
pub struct FilterSpec {
    /// Query parameter name
    pub name: String,
    pub label: String,
    pub choices: Vec<FilterChoice>,
}

impl FilterSpec {
    fn new<'a>(
        admin: &ModelAdmin,
        name: &str,
        choices: impl IntoIterator<Item = (&'a str, &'a str)>,
        selected: Option<&str>,
    ) -> Self {
        let mut rendered = vec![FilterChoice {
            value: None,
            label: "All".to_string(),
            selected: selected.is_none(),
        }];
        rendered.extend(choices.into_iter().map(|(value, label)| FilterChoice {
            value: Some(value.to_string()),
            label: label.to_string(),
            selected: selected == Some(value),
        }));

        Self { name: name.to_string(), label: admin.label(name), choices: rendered }
    }
}

/// Filters of the book instance changelist, with the current selection
pub fn instance_filters(admin: &ModelAdmin, query: &BookInstanceQuery) -> Vec<FilterSpec> {
    admin
        .list_filter
        .iter()
        .filter_map(|name| match *name {
            "status" => Some(FilterSpec::new(
                admin,
                name,
                LoanStatus::ALL.iter().map(|s| (s.code(), s.label())),
                query.status.map(|s| s.code()),
            )),
            "due_back" => Some(FilterSpec::new(
                admin,
                name,
                DueBackFilter::ALL.iter().map(|f| (f.query_value(), f.label())),
                query.due_back.map(|f| f.query_value()),
            )),
            _ => None,
        })
        .collect()
}

/// List screen of a model
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeList {
    pub model: String,
    pub title: String,
    pub columns: Vec<Column>,
    pub filters: Vec<FilterSpec>,
    pub rows: Vec<ChangeListRow>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Empty values render as [`EMPTY_VALUE`]
fn display(value: Option<Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::String(EMPTY_VALUE.to_string()),
        Some(Value::String(s)) if s.is_empty() => Value::String(EMPTY_VALUE.to_string()),
        Some(v) => v,
    }
}

impl ChangeList {
    pub fn build<M: AdminModel>(
        admin: &ModelAdmin,
        objects: &[M],
        total: i64,
        page: i64,
        per_page: i64,
    ) -> Self {
        let columns = admin
            .list_display
            .iter()
            .map(|name| Column { name: name.to_string(), label: admin.label(name) })
            .collect();

        let rows = objects
            .iter()
            .map(|obj| {
                let id = obj.pk();
                let values = admin
                    .list_display
                    .iter()
                    .map(|name| (name.to_string(), display(column_value(obj, name))))
                    .collect();
                ChangeListRow { url: admin.change_url(&id), id, values }
            })
            .collect();

        Self {
            model: admin.slug.to_string(),
            title: format!("Select {} to change", admin.verbose_name),
            columns,
            filters: Vec::new(),
            rows,
            total,
            page,
            per_page,
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = filters;
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FormField {
    pub name: String,
    pub label: String,
    #[schema(value_type = Object)]
    pub value: Value,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RenderedFieldset {
    pub name: Option<String>,
    /// Fields grouped by line
    pub rows: Vec<Vec<FormField>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InlineRow {
    pub id: String,
    #[schema(value_type = Object)]
    pub values: IndexMap<String, Value>,
}

/// Related objects editable from the change form
#[derive(Debug, Serialize, ToSchema)]
pub struct RenderedInline {
    pub model: String,
    #[schema(value_type = String)]
    pub style: InlineStyle,
    pub extra: usize,
    pub columns: Vec<Column>,
    pub rows: Vec<InlineRow>,
}

/// Detail screen of one object
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeForm {
    pub model: String,
    pub id: String,
    pub title: String,
    /// String representation of the object
    pub object: String,
    pub url: String,
    pub fieldsets: Vec<RenderedFieldset>,
    pub inlines: Vec<RenderedInline>,
}

impl ChangeForm {
    pub fn build<M: AdminModel>(admin: &ModelAdmin, obj: &M) -> Self {
        let fieldsets = admin
            .fieldsets
            .iter()
            .map(|fs| RenderedFieldset {
                name: fs.name.map(str::to_string),
                rows: fs
                    .rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|name| FormField {
                                name: name.to_string(),
                                label: admin.label(name),
                                value: obj.form_value(name).unwrap_or(Value::Null),
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();

        let id = obj.pk();
        Self {
            model: admin.slug.to_string(),
            url: admin.change_url(&id),
            id,
            title: format!("Change {}", admin.verbose_name),
            object: obj.to_string(),
            fieldsets,
            inlines: Vec::new(),
        }
    }

    /// Append an inline editor listing `related`
    pub fn with_inline<R: AdminModel>(
        mut self,
        admin: &ModelAdmin,
        inline: &InlineAdmin,
        related: &[R],
    ) -> Self {
        let columns = inline
            .fields
            .iter()
            .map(|name| Column { name: name.to_string(), label: admin.label(name) })
            .collect();

        let rows = related
            .iter()
            .map(|obj| InlineRow {
                id: obj.pk(),
                values: inline
                    .fields
                    .iter()
                    .map(|name| (name.to_string(), obj.form_value(name).unwrap_or(Value::Null)))
                    .collect(),
            })
            .collect();

        self.inlines.push(RenderedInline {
            model: inline.model.to_string(),
            style: inline.style,
            extra: inline.extra,
            columns,
            rows,
        });
        self
    }
}

/// Entry of the admin index
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexEntry {
    pub model: String,
    pub name: String,
    pub url: String,
}

pub fn index() -> Vec<IndexEntry> {
    REGISTRY
        .iter()
        .map(|admin| IndexEntry {
            model: admin.slug.to_string(),
            name: admin.label(admin.verbose_name_plural),
            url: admin.list_url(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::{
        fields::tests::{copy_of, jane, sample_book},
        lookup, AUTHOR_ADMIN, BOOK_ADMIN, BOOK_INSTANCE_ADMIN,
    };
    use serde_json::json;

    #[test]
    fn test_book_changelist() {
        let list = ChangeList::build(&BOOK_ADMIN, &[sample_book()], 1, 1, 100);
        let labels: Vec<_> = list.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Title", "Author", "Genre", "Language"]);

        let row = &list.rows[0];
        assert_eq!(row.url, "/admin/books/42");
        let values: Vec<_> = row.values.values().cloned().collect();
        assert_eq!(values, [json!("Sample"), json!("Jane Doe"), json!("Fiction"), json!("English")]);
    }

    #[test]
    fn test_orphaned_copy_renders_empty_book() {
        let list = ChangeList::build(&BOOK_INSTANCE_ADMIN, &[copy_of(None)], 1, 1, 100);
        let row = &list.rows[0];
        assert_eq!(row.values["book"], json!(EMPTY_VALUE));
        assert_eq!(row.values["status"], json!("On loan"));
        assert_eq!(row.values["due_back"], json!(EMPTY_VALUE));
    }

    #[test]
    fn test_instance_filters_mark_selection() {
        let query = BookInstanceQuery {
            status: Some(LoanStatus::Available),
            ..Default::default()
        };
        let filters = instance_filters(&BOOK_INSTANCE_ADMIN, &query);
        assert_eq!(filters.len(), 2);

        let status = &filters[0];
        assert_eq!(status.name, "status");
        assert_eq!(status.choices.len(), 5);
        let selected: Vec<_> = status.choices.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].value.as_deref(), Some("a"));

        let due_back = &filters[1];
        assert_eq!(due_back.choices.len(), 7);
        assert!(due_back.choices[0].selected);
    }

    #[test]
    fn test_author_change_form() {
        let form = ChangeForm::build(&AUTHOR_ADMIN, &jane());
        assert_eq!(form.object, "Jane Doe");
        assert_eq!(form.fieldsets.len(), 1);
        assert!(form.fieldsets[0].name.is_none());
        let first_line: Vec<_> = form.fieldsets[0].rows[0].iter().map(|f| f.name.as_str()).collect();
        assert_eq!(first_line, ["first_name", "last_name"]);
        assert_eq!(form.fieldsets[0].rows[1][1].value, Value::Null);
    }

    #[test]
    fn test_book_change_form_with_inline() {
        let book = sample_book();
        let copies = vec![copy_of(Some(&book)), copy_of(Some(&book))];
        let form = ChangeForm::build(&BOOK_ADMIN, &book)
            .with_inline(&BOOK_ADMIN, &BOOK_ADMIN.inlines[0], &copies);

        assert_eq!(form.url, book.absolute_url());
        let inline = &form.inlines[0];
        assert_eq!(inline.model, "book-instances");
        assert_eq!(inline.extra, 0);
        assert_eq!(inline.rows.len(), 2);
        assert_eq!(inline.rows[0].values["status"], json!("o"));
    }

    #[test]
    fn test_instance_fieldsets() {
        let form = ChangeForm::build(&BOOK_INSTANCE_ADMIN, &copy_of(Some(&sample_book())));
        let names: Vec<_> = form.fieldsets.iter().map(|fs| fs.name.as_deref()).collect();
        assert_eq!(names, [Some("Book information"), Some("Availability")]);
        assert_eq!(form.fieldsets[0].rows[0][0].value, json!(42));
    }

    #[test]
    fn test_instance_change_form_object_label() {
        let linked = copy_of(Some(&sample_book()));
        let form = ChangeForm::build(&BOOK_INSTANCE_ADMIN, &linked);
        assert_eq!(form.object, format!("{} (Sample)", linked.id));

        let orphaned = copy_of(None);
        let form = ChangeForm::build(&BOOK_INSTANCE_ADMIN, &orphaned);
        assert_eq!(form.object, orphaned.id.to_string());
    }

    #[test]
    fn test_index_lists_every_model() {
        let entries = index();
        assert_eq!(entries.len(), 5);
        assert!(entries.iter().all(|e| lookup(&e.model).is_some()));
        assert_eq!(entries[2].name, "Book instances");
        assert_eq!(entries[2].url, "/admin/book-instances");
    }
}

//! Book admin screens
//!
//! The change form lists the book's copies inline; submitting it may add,
//! change or remove copies along with the book fields.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    admin::{ChangeForm, ChangeList, BOOK_ADMIN},
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        PageQuery,
    },
    AppState,
};

use super::Payload;

/// Book changelist
#[utoipa::path(
    get,
    path = "/admin/books",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "Books ordered by title", body = ChangeList)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ChangeList>> {
    let (page, per_page, offset) = query.resolve(state.config.admin.per_page);
    let (books, total) = state.services.books.list(per_page, offset).await?;
    Ok(Json(ChangeList::build(&BOOK_ADMIN, &books, total, page, per_page)))
}

/// Book change form with its copies inline
#[utoipa::path(
    get,
    path = "/admin/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Change form", body = ChangeForm),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ChangeForm>> {
    let book = state.services.books.get_by_id(id).await?;
    let instances = state.services.books.instances(id).await?;

    let mut form = ChangeForm::build(&BOOK_ADMIN, &book);
    for inline in BOOK_ADMIN.inlines {
        form = form.with_inline(&BOOK_ADMIN, inline, &instances);
    }
    Ok(Json(form))
}

/// Add a book
#[utoipa::path(
    post,
    path = "/admin/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 409, description = "Title already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Payload(data): Payload<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Change a book and its inline copies
#[utoipa::path(
    put,
    path = "/admin/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book or copy not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Title already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Payload(data): Payload<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book; its copies are kept without a book
#[utoipa::path(
    delete,
    path = "/admin/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Author admin screens

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    admin::{ChangeForm, ChangeList, AUTHOR_ADMIN},
    error::AppResult,
    models::{
        author::{Author, CreateAuthor, UpdateAuthor},
        PageQuery,
    },
    AppState,
};

use super::Payload;

/// Author changelist
#[utoipa::path(
    get,
    path = "/admin/authors",
    tag = "authors",
    params(PageQuery),
    responses(
        (status = 200, description = "Authors ordered by first name", body = ChangeList)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ChangeList>> {
    let (page, per_page, offset) = query.resolve(state.config.admin.per_page);
    let (authors, total) = state.services.authors.list(per_page, offset).await?;
    Ok(Json(ChangeList::build(&AUTHOR_ADMIN, &authors, total, page, per_page)))
}

/// Author change form
#[utoipa::path(
    get,
    path = "/admin/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Change form", body = ChangeForm),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ChangeForm>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(ChangeForm::build(&AUTHOR_ADMIN, &author)))
}

/// Add an author
#[utoipa::path(
    post,
    path = "/admin/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Payload(data): Payload<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Change an author
#[utoipa::path(
    put,
    path = "/admin/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Payload(data): Payload<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.update(id, &data).await?;
    Ok(Json(author))
}

/// Delete an author and all of their books
#[utoipa::path(
    delete,
    path = "/admin/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

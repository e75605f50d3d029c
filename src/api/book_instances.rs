//! Book instance admin screens

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    admin::{render::instance_filters, ChangeForm, ChangeList, BOOK_INSTANCE_ADMIN},
    error::AppResult,
    models::{
        book_instance::{BookInstance, BookInstanceQuery, CreateBookInstance, UpdateBookInstance},
        PageQuery,
    },
    AppState,
};

use super::Payload;

/// Book instance changelist, filterable by status and due date
#[utoipa::path(
    get,
    path = "/admin/book-instances",
    tag = "book-instances",
    params(BookInstanceQuery),
    responses(
        (status = 200, description = "Copies ordered by due date", body = ChangeList)
    )
)]
pub async fn list_book_instances(
    State(state): State<AppState>,
    Query(query): Query<BookInstanceQuery>,
) -> AppResult<Json<ChangeList>> {
    let paging = PageQuery { page: query.page, per_page: query.per_page };
    let (page, per_page, offset) = paging.resolve(state.config.admin.per_page);

    let (instances, total) = state.services.book_instances.list(&query, per_page, offset).await?;

    let list = ChangeList::build(&BOOK_INSTANCE_ADMIN, &instances, total, page, per_page)
        .with_filters(instance_filters(&BOOK_INSTANCE_ADMIN, &query));
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/admin/book-instances/{id}",
    tag = "book-instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Change form", body = ChangeForm),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ChangeForm>> {
    let instance = state.services.book_instances.get_by_id(id).await?;
    Ok(Json(ChangeForm::build(&BOOK_INSTANCE_ADMIN, &instance)))
}

/// Add a copy; its id is generated
#[utoipa::path(
    post,
    path = "/admin/book-instances",
    tag = "book-instances",
    request_body = CreateBookInstance,
    responses(
        (status = 201, description = "Book instance created", body = BookInstance),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Payload(data): Payload<CreateBookInstance>,
) -> AppResult<(StatusCode, Json<BookInstance>)> {
    let instance = state.services.book_instances.create(&data).await?;
    Ok((StatusCode::CREATED, Json(instance)))
}

#[utoipa::path(
    put,
    path = "/admin/book-instances/{id}",
    tag = "book-instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body = UpdateBookInstance,
    responses(
        (status = 200, description = "Book instance updated", body = BookInstance),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Payload(data): Payload<UpdateBookInstance>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.book_instances.update(id, &data).await?;
    Ok(Json(instance))
}

#[utoipa::path(
    delete,
    path = "/admin/book-instances/{id}",
    tag = "book-instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 204, description = "Book instance deleted"),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.book_instances.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

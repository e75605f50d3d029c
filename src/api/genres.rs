//! Genre admin screens

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    admin::{ChangeForm, ChangeList, GENRE_ADMIN},
    error::AppResult,
    models::{
        genre::{CreateGenre, Genre, UpdateGenre},
        PageQuery,
    },
    AppState,
};

use super::Payload;

/// Genre changelist
#[utoipa::path(
    get,
    path = "/admin/genres",
    tag = "genres",
    params(PageQuery),
    responses(
        (status = 200, description = "Genres ordered by name", body = ChangeList)
    )
)]
pub async fn list_genres(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ChangeList>> {
    let (page, per_page, offset) = query.resolve(state.config.admin.per_page);
    let (genres, total) = state.services.genres.list(per_page, offset).await?;
    Ok(Json(ChangeList::build(&GENRE_ADMIN, &genres, total, page, per_page)))
}

/// Genre change form
#[utoipa::path(
    get,
    path = "/admin/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Change form", body = ChangeForm),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ChangeForm>> {
    let genre = state.services.genres.get_by_id(id).await?;
    Ok(Json(ChangeForm::build(&GENRE_ADMIN, &genre)))
}

/// Add a genre
#[utoipa::path(
    post,
    path = "/admin/genres",
    tag = "genres",
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Payload(data): Payload<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.services.genres.create(&data).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

#[utoipa::path(
    put,
    path = "/admin/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = UpdateGenre,
    responses(
        (status = 200, description = "Genre updated", body = Genre),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Payload(data): Payload<UpdateGenre>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.update(id, &data).await?;
    Ok(Json(genre))
}

#[utoipa::path(
    delete,
    path = "/admin/genres/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.genres.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

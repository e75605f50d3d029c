//! Language admin screens

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    admin::{ChangeForm, ChangeList, LANGUAGE_ADMIN},
    error::AppResult,
    models::{
        language::{CreateLanguage, Language, UpdateLanguage},
        PageQuery,
    },
    AppState,
};

use super::Payload;

/// Language changelist
#[utoipa::path(
    get,
    path = "/admin/languages",
    tag = "languages",
    params(PageQuery),
    responses(
        (status = 200, description = "Languages ordered by name", body = ChangeList)
    )
)]
pub async fn list_languages(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<ChangeList>> {
    let (page, per_page, offset) = query.resolve(state.config.admin.per_page);
    let (languages, total) = state.services.languages.list(per_page, offset).await?;
    Ok(Json(ChangeList::build(&LANGUAGE_ADMIN, &languages, total, page, per_page)))
}

/// Language change form
#[utoipa::path(
    get,
    path = "/admin/languages/{id}",
    tag = "languages",
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 200, description = "Change form", body = ChangeForm),
        (status = 404, description = "Language not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ChangeForm>> {
    let language = state.services.languages.get_by_id(id).await?;
    Ok(Json(ChangeForm::build(&LANGUAGE_ADMIN, &language)))
}

#[utoipa::path(
    post,
    path = "/admin/languages",
    tag = "languages",
    request_body = CreateLanguage,
    responses(
        (status = 201, description = "Language created", body = Language),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_language(
    State(state): State<AppState>,
    Payload(data): Payload<CreateLanguage>,
) -> AppResult<(StatusCode, Json<Language>)> {
    let language = state.services.languages.create(&data).await?;
    Ok((StatusCode::CREATED, Json(language)))
}

#[utoipa::path(
    put,
    path = "/admin/languages/{id}",
    tag = "languages",
    params(("id" = i32, Path, description = "Language ID")),
    request_body = UpdateLanguage,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 404, description = "Language not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Payload(data): Payload<UpdateLanguage>,
) -> AppResult<Json<Language>> {
    let language = state.services.languages.update(id, &data).await?;
    Ok(Json(language))
}

/// Delete a language and every book written in it
#[utoipa::path(
    delete,
    path = "/admin/languages/{id}",
    tag = "languages",
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 404, description = "Language not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_language(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.languages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Admin index

use axum::Json;

use crate::admin::render::{index, IndexEntry};

/// Registered models with their changelist paths
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    responses(
        (status = 200, description = "Registered models", body = Vec<IndexEntry>)
    )
)]
pub async fn admin_index() -> Json<Vec<IndexEntry>> {
    Json(index())
}

//! Handlers for tagging.
//!
//! Autocomplete and tag replacement keep the plain payloads their clients
//! expect (`["title", ...]` and `{ "success": ... }`); the read endpoints
//! use the standard envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tunobase_core::error::CoreError;
use tunobase_core::types::DbId;
use tunobase_db::models::tag::{RetrieveTagsParams, UpdateTagsRequest};
use tunobase_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Autocomplete and replacement
// ---------------------------------------------------------------------------

/// GET /api/v1/tags/retrieve?term=
///
/// Titles of the current site's tags containing `term`.
pub async fn retrieve_tags(
    State(state): State<AppState>,
    Query(params): Query<RetrieveTagsParams>,
) -> AppResult<impl IntoResponse> {
    let titles = TagRepo::retrieve_tags(&state.pool, state.site.id, &params.term).await?;
    Ok(Json(titles))
}

/// POST /api/v1/tags/update
///
/// Replace every tag on one object for the current site. A malformed or
/// incomplete body answers `{ "success": false }` with 400.
pub async fn update_tags(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    payload: Result<Json<UpdateTagsRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Ok(Json(input)) = payload else {
        return Ok((StatusCode::BAD_REQUEST, Json(json!({ "success": false }))));
    };

    let content_type = input
        .tag_content_type
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let (Some(content_type), Some(object_pk)) = (content_type, input.tag_object_pk) else {
        return Ok((StatusCode::BAD_REQUEST, Json(json!({ "success": false }))));
    };

    TagRepo::replace_tags(
        &state.pool,
        state.site.id,
        content_type,
        object_pk,
        &input.tags,
    )
    .await?;

    tracing::debug!(content_type, object_pk, user_id = editor.user_id, "Tags updated by editor");

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/tags/objects/{content_type}/{object_pk}
pub async fn get_object_tags(
    State(state): State<AppState>,
    Path((content_type, object_pk)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let tags =
        TagRepo::get_tags_for_object(&state.pool, &content_type, object_pk, state.site_scope())
            .await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/tags/types/{content_type}/unique
pub async fn get_unique_tags(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> AppResult<impl IntoResponse> {
    let titles =
        TagRepo::get_unique_tags_for_object_type(&state.pool, &content_type, state.site_scope())
            .await?;
    Ok(Json(DataResponse { data: titles }))
}

/// GET /api/v1/tags/types/{content_type}/counts
pub async fn get_tag_counts(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> AppResult<impl IntoResponse> {
    let counts =
        TagRepo::get_tag_counts_for_object_type(&state.pool, &content_type, state.site_scope())
            .await?;
    Ok(Json(DataResponse { data: counts }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// DELETE /api/v1/admin/tags/{id}
///
/// Delete a tag and all its object associations. Admin only.
pub async fn delete_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = TagRepo::delete(&state.pool, tag_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }));
    }

    tracing::info!(tag_id, user_id = admin.user_id, "Tag deleted");

    Ok(StatusCode::NO_CONTENT)
}

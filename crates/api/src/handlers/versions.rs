//! Handlers for the version workflow: stage, publish, unpublish, mark
//! deleted, and the revision listings editors work from.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use tunobase_core::content::ContentKind;
use tunobase_core::error::CoreError;
use tunobase_core::state::ContentState;
use tunobase_core::types::DbId;
use tunobase_db::models::version::{TransitionOutcome, Version, VersionListEntry};
use tunobase_db::repositories::VersionRepo;

use super::content::parse_kind;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::StateParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Map a transition outcome onto the HTTP error model.
fn applied(outcome: TransitionOutcome, object_id: DbId) -> AppResult<Version> {
    match outcome {
        TransitionOutcome::Applied(version) => Ok(version),
        TransitionOutcome::NoVersion => Err(AppError::Core(CoreError::NotFound {
            entity: "Version",
            id: object_id,
        })),
        TransitionOutcome::Refused(err) => Err(AppError::Core(err)),
    }
}

async fn run_transition(
    state: &AppState,
    kind: &str,
    object_id: DbId,
    to: ContentState,
) -> AppResult<Version> {
    let kind: ContentKind = parse_kind(kind)?;
    let outcome = VersionRepo::transition(&state.pool, kind, object_id, to).await?;
    applied(outcome, object_id)
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// POST /api/v1/content/{kind}/{id}/stage
pub async fn stage(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let version = run_transition(&state, &kind, id, ContentState::Staged).await?;
    Ok(Json(DataResponse { data: version }))
}

/// POST /api/v1/content/{kind}/{id}/publish
pub async fn publish(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let version = run_transition(&state, &kind, id, ContentState::Published).await?;
    Ok(Json(DataResponse { data: version }))
}

/// POST /api/v1/content/{kind}/{id}/unpublish
pub async fn unpublish(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let version = run_transition(&state, &kind, id, ContentState::Unpublished).await?;
    Ok(Json(DataResponse { data: version }))
}

/// DELETE /api/v1/content/{kind}/{id}
///
/// Soft delete: the version and its object move to `Deleted`. Rows are kept.
pub async fn mark_deleted(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let version = run_transition(&state, &kind, id, ContentState::Deleted).await?;
    Ok(Json(DataResponse { data: version }))
}

// ---------------------------------------------------------------------------
// Series listings
// ---------------------------------------------------------------------------

/// GET /api/v1/content/{kind}/{id}/series
pub async fn get_series(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let series = VersionRepo::get_series(&state.pool, kind, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VersionSeries",
            id,
        }))?;
    Ok(Json(DataResponse { data: series }))
}

/// GET /api/v1/content/{kind}/{id}/versions?state=
///
/// Revisions in the object's series, each with its change URL. Without a
/// `state` filter every revision is listed. Objects without a series list
/// nothing.
pub async fn version_list(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Query(params): Query<StateParams>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let entries = match params.state {
        Some(filter) => VersionRepo::version_list(&state.pool, kind, id, filter).await?,
        None => match VersionRepo::get_series(&state.pool, kind, id).await? {
            Some(series) => VersionRepo::list_for_series(&state.pool, series.id)
                .await?
                .into_iter()
                .map(VersionListEntry::new)
                .collect(),
            None => Vec::new(),
        },
    };
    Ok(Json(DataResponse { data: entries }))
}

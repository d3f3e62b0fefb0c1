//! On-demand triggers for scheduled tasks.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tunobase_db::repositories::VersionRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PublishObjectsResult {
    pub published: u64,
}

/// POST /api/v1/tasks/publish-objects
///
/// Run one scheduled publishing pass now.
pub async fn publish_objects(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let published = VersionRepo::publish_objects(&state.pool).await?;

    tracing::info!(published, user_id = editor.user_id, "Publish pass triggered");

    Ok(Json(DataResponse {
        data: PublishObjectsResult { published },
    }))
}

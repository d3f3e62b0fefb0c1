//! Route definitions for on-demand task triggers.

use axum::routing::post;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task routes mounted at `/tasks`.
///
/// ```text
/// POST   /publish-objects           -> publish_objects (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/publish-objects", post(tasks::publish_objects))
}

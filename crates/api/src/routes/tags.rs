//! Route definitions for tagging.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET    /retrieve?term=                          -> retrieve_tags
/// POST   /update                                  -> update_tags (editor)
/// GET    /objects/{content_type}/{object_pk}      -> get_object_tags
/// GET    /types/{content_type}/unique             -> get_unique_tags
/// GET    /types/{content_type}/counts             -> get_tag_counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/retrieve", get(tags::retrieve_tags))
        .route("/update", post(tags::update_tags))
        .route(
            "/objects/{content_type}/{object_pk}",
            get(tags::get_object_tags),
        )
        .route("/types/{content_type}/unique", get(tags::get_unique_tags))
        .route("/types/{content_type}/counts", get(tags::get_tag_counts))
}

//! Route definitions for content items, content blocks, and the version
//! workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{content, versions};
use crate::state::AppState;

/// Content routes mounted at `/content`.
///
/// ```text
/// POST   /                          -> create_content (editor)
/// GET    /{kind}                    -> get_list
/// GET    /{kind}/permitted          -> permitted
/// GET    /{kind}/console            -> console (editor)
/// GET    /{kind}/slug/{slug}        -> get_by_slug
/// GET    /{kind}/{id}               -> get_by_id (editor)
/// PUT    /{kind}/{id}               -> update_content (editor)
/// DELETE /{kind}/{id}               -> mark_deleted (editor)
/// POST   /{kind}/{id}/stage         -> stage (editor)
/// POST   /{kind}/{id}/publish       -> publish (editor)
/// POST   /{kind}/{id}/unpublish     -> unpublish (editor)
/// GET    /{kind}/{id}/series        -> get_series (editor)
/// GET    /{kind}/{id}/versions      -> version_list (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(content::create_content))
        .route("/{kind}", get(content::get_list))
        .route("/{kind}/permitted", get(content::permitted))
        .route("/{kind}/console", get(content::console))
        .route("/{kind}/slug/{slug}", get(content::get_by_slug))
        .route(
            "/{kind}/{id}",
            get(content::get_by_id)
                .put(content::update_content)
                .delete(versions::mark_deleted),
        )
        .route("/{kind}/{id}/stage", post(versions::stage))
        .route("/{kind}/{id}/publish", post(versions::publish))
        .route("/{kind}/{id}/unpublish", post(versions::unpublish))
        .route("/{kind}/{id}/series", get(versions::get_series))
        .route("/{kind}/{id}/versions", get(versions::version_list))
}

/// Content block routes mounted at `/content-blocks`.
///
/// ```text
/// GET    /{slug}                    -> get_content_block
/// PUT    /{slug}                    -> update_content_block (editor)
/// ```
pub fn content_block_router() -> Router<AppState> {
    Router::new().route(
        "/{slug}",
        get(content::get_content_block).put(content::update_content_block),
    )
}

/// Content block set routes mounted at `/content-block-sets`.
///
/// ```text
/// GET    /{slug}                    -> get_content_block_set
/// ```
pub fn content_block_set_router() -> Router<AppState> {
    Router::new().route("/{slug}", get(content::get_content_block_set))
}

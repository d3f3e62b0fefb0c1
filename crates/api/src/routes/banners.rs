//! Route definitions for banners and banner sets.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::banners;
use crate::state::AppState;

/// Banner routes mounted at `/banners`.
///
/// ```text
/// POST   /                          -> create_banner (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(banners::create_banner))
}

/// Banner set routes mounted at `/banner-sets`.
///
/// ```text
/// POST   /                                  -> create_banner_set (editor)
/// GET    /slug/{slug}                       -> get_banner_set
/// POST   /{set_id}/banners/{banner_id}      -> add_banner_to_set (editor)
/// ```
pub fn set_router() -> Router<AppState> {
    Router::new()
        .route("/", post(banners::create_banner_set))
        .route("/slug/{slug}", get(banners::get_banner_set))
        .route(
            "/{set_id}/banners/{banner_id}",
            post(banners::add_banner_to_set),
        )
}

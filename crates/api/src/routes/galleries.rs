//! Route definitions for galleries and default images.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::galleries;
use crate::state::AppState;

/// Gallery routes mounted at `/galleries`.
///
/// ```text
/// GET    /slug/{slug}                             -> get_gallery
/// POST   /{gallery_id}/images                     -> create_gallery_image (editor)
/// GET    /{gallery_id}/images/{image_id}/surrounding -> get_surrounding_images
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/slug/{slug}", get(galleries::get_gallery))
        .route(
            "/{gallery_id}/images",
            post(galleries::create_gallery_image),
        )
        .route(
            "/{gallery_id}/images/{image_id}/surrounding",
            get(galleries::get_surrounding_images),
        )
}

/// Default image routes mounted at `/default-images`.
///
/// ```text
/// POST   /                          -> create_default_image (editor)
/// ```
pub fn default_image_router() -> Router<AppState> {
    Router::new().route("/", post(galleries::create_default_image))
}

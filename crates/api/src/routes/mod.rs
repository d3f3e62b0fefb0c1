pub mod admin;
pub mod banners;
pub mod content;
pub mod galleries;
pub mod health;
pub mod tags;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /content                                         create (editor)
/// /content/{kind}                                  one object per series (paginated)
/// /content/{kind}/permitted                        visitor-visible objects (paginated)
/// /content/{kind}/console                          editor console listing
/// /content/{kind}/slug/{slug}                      permitted object with breadcrumbs
/// /content/{kind}/{id}                             get, update, mark deleted (editor)
/// /content/{kind}/{id}/stage                       stage (POST)
/// /content/{kind}/{id}/publish                     publish (POST)
/// /content/{kind}/{id}/unpublish                   unpublish (POST)
/// /content/{kind}/{id}/series                      version series (GET)
/// /content/{kind}/{id}/versions                    revisions (?state=)
///
/// /content-blocks/{slug}                           get, inline edit (PUT)
/// /content-block-sets/{slug}                       set with its blocks
///
/// /galleries/slug/{slug}                           gallery with images
/// /galleries/{gallery_id}/images                   add image (POST)
/// /galleries/{gallery_id}/images/{id}/surrounding  previous/next image ids
/// /default-images                                  register (POST)
///
/// /banners                                         create (POST)
/// /banner-sets                                     create (POST)
/// /banner-sets/slug/{slug}                         set with its banners
/// /banner-sets/{set_id}/banners/{banner_id}        add banner (POST)
///
/// /tags/retrieve                                   autocomplete (?term=)
/// /tags/update                                     replace object tags (POST)
/// /tags/objects/{content_type}/{object_pk}         tags of one object
/// /tags/types/{content_type}/unique                distinct titles
/// /tags/types/{content_type}/counts                counts per title
///
/// /admin/tags/{id}                                 delete tag (admin)
/// /admin/outbound-emails                           tracked mail (admin)
/// /admin/test-email                                send test message (admin)
///
/// /tasks/publish-objects                           run a publish pass (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content::router())
        .nest("/content-blocks", content::content_block_router())
        .nest("/content-block-sets", content::content_block_set_router())
        .nest("/galleries", galleries::router())
        .nest("/default-images", galleries::default_image_router())
        .nest("/banners", banners::router())
        .nest("/banner-sets", banners::set_router())
        .nest("/tags", tags::router())
        .nest("/admin", admin::router())
        .nest("/tasks", tasks::router())
}

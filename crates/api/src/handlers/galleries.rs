//! Handlers for galleries, their images, and default images.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tunobase_core::content::ContentKind;
use tunobase_core::error::CoreError;
use tunobase_core::navigation::{letterify, render_breadcrumbs, surrounding_images};
use tunobase_core::types::DbId;
use tunobase_db::models::content::ContentItem;
use tunobase_db::models::default_image::CreateDefaultImage;
use tunobase_db::models::gallery::{CreateGalleryImage, GalleryImage};
use tunobase_db::repositories::{ContentRepo, DefaultImageRepo, GalleryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// A gallery image with its lettered marker (`A`, `B`, ...).
#[derive(Debug, Serialize)]
pub struct MarkedImage {
    #[serde(flatten)]
    pub image: GalleryImage,
    pub marker: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryDetail {
    #[serde(flatten)]
    pub gallery: ContentItem,
    pub breadcrumbs: String,
    pub images: Vec<MarkedImage>,
}

/// GET /api/v1/galleries/slug/{slug}
///
/// A permitted gallery of the current site with its permitted images.
pub async fn get_gallery(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let gallery = ContentRepo::permitted_by_slug(
        &state.pool,
        ContentKind::Gallery,
        &slug,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFoundBySlug {
            entity: "Gallery",
            slug: slug.clone(),
        })
    })?;

    let images = GalleryRepo::permitted_images(
        &state.pool,
        gallery.id,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .into_iter()
    .enumerate()
    .map(|(i, image)| MarkedImage {
        image,
        marker: letterify(i as u32),
    })
    .collect();

    let breadcrumbs = render_breadcrumbs(&[
        ("Home", Some("/")),
        ("Galleries", Some("/api/v1/content/gallery")),
        (gallery.title.as_str(), None),
    ]);

    Ok(Json(DataResponse {
        data: GalleryDetail {
            gallery,
            breadcrumbs,
            images,
        },
    }))
}

/// GET /api/v1/galleries/{gallery_id}/images/{image_id}/surrounding
///
/// Previous and next image ids around one image in display order.
pub async fn get_surrounding_images(
    State(state): State<AppState>,
    Path((gallery_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let ordered: Vec<DbId> = GalleryRepo::permitted_images(
        &state.pool,
        gallery_id,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .iter()
    .map(|image| image.id)
    .collect();

    if !ordered.contains(&image_id) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "GalleryImage",
            id: image_id,
        }));
    }

    Ok(Json(DataResponse {
        data: surrounding_images(&ordered, image_id),
    }))
}

/// POST /api/v1/galleries/{gallery_id}/images
pub async fn create_gallery_image(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(gallery_id): Path<DbId>,
    Json(input): Json<CreateGalleryImage>,
) -> AppResult<impl IntoResponse> {
    ContentRepo::find_by_id(&state.pool, ContentKind::Gallery, gallery_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gallery",
            id: gallery_id,
        }))?;

    if input.image_path.trim().is_empty() {
        return Err(AppError::BadRequest("image_path must not be empty".into()));
    }

    let site_ids = input
        .site_ids
        .clone()
        .unwrap_or_else(|| vec![state.site.id]);
    let image = GalleryRepo::create_image(&state.pool, gallery_id, &input, &site_ids).await?;

    tracing::info!(
        gallery_id,
        image_id = image.id,
        user_id = editor.user_id,
        "Gallery image created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// POST /api/v1/default-images
pub async fn create_default_image(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateDefaultImage>,
) -> AppResult<impl IntoResponse> {
    if input.category.trim().is_empty() || input.image_path.trim().is_empty() {
        return Err(AppError::BadRequest(
            "category and image_path must not be empty".into(),
        ));
    }

    let image = DefaultImageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        default_image_id = image.id,
        category = %image.category,
        user_id = editor.user_id,
        "Default image created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

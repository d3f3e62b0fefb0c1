//! Handlers for image/HTML banners and banner sets.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tunobase_core::content::validate_title;
use tunobase_core::error::CoreError;
use tunobase_core::naming::slugify;
use tunobase_core::types::DbId;
use tunobase_db::models::banner::{CreateBanner, CreateBannerSet};
use tunobase_db::repositories::BannerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/banner-sets/slug/{slug}
///
/// A permitted banner set of the current site with its permitted banners.
pub async fn get_banner_set(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let set = BannerRepo::permitted_set_by_slug(
        &state.pool,
        &slug,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::NotFoundBySlug {
            entity: "BannerSet",
            slug: slug.clone(),
        })
    })?;

    Ok(Json(DataResponse { data: set }))
}

/// POST /api/v1/banners
pub async fn create_banner(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateBanner>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;

    let site_ids = input
        .site_ids
        .clone()
        .unwrap_or_else(|| vec![state.site.id]);
    let banner = BannerRepo::create_banner(&state.pool, &input, &site_ids).await?;

    tracing::info!(
        banner_id = banner.id,
        kind = %banner.kind,
        user_id = editor.user_id,
        "Banner created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: banner })))
}

/// POST /api/v1/banner-sets
pub async fn create_banner_set(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(mut input): Json<CreateBannerSet>,
) -> AppResult<impl IntoResponse> {
    input.slug = slugify(&input.slug);
    if input.slug.is_empty() {
        return Err(AppError::BadRequest("slug must not be empty".into()));
    }

    let site_ids = input
        .site_ids
        .clone()
        .unwrap_or_else(|| vec![state.site.id]);
    let set = BannerRepo::create_set(&state.pool, &input, &site_ids).await?;

    tracing::info!(
        banner_set_id = set.id,
        slug = %set.slug,
        user_id = editor.user_id,
        "Banner set created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// POST /api/v1/banner-sets/{set_id}/banners/{banner_id}
///
/// A set only holds banners of its own kind; mismatches are a conflict.
pub async fn add_banner_to_set(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path((set_id, banner_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let added = BannerRepo::add_to_set(&state.pool, set_id, banner_id).await?;
    if !added {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Banner {banner_id} cannot be added to banner set {set_id}: \
             it is missing, already a member, or of a different kind"
        ))));
    }

    tracing::info!(
        banner_set_id = set_id,
        banner_id,
        user_id = editor.user_id,
        "Banner added to set"
    );

    Ok(StatusCode::NO_CONTENT)
}

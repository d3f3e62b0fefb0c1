//! Handlers for content items: visitor listings and lookups, editor CRUD,
//! and content block inline editing.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tunobase_core::content::{validate_title, ContentKind};
use tunobase_core::error::CoreError;
use tunobase_core::navigation::render_breadcrumbs;
use tunobase_core::site::SiteScope;
use tunobase_core::types::DbId;
use tunobase_db::models::content::{
    ContentItem, CreateContentItem, NewContentItem, UpdateContentItem,
};
use tunobase_db::models::tag::ObjectTag;
use tunobase_db::models::version::Version;
use tunobase_db::repositories::{ContentRepo, DefaultImageRepo, TagRepo, VersionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::query::PageParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// A visitor-facing content item with its breadcrumb trail and tags.
#[derive(Debug, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    pub breadcrumbs: String,
    pub tags: Vec<ObjectTag>,
}

/// An editor's view of a content item.
#[derive(Debug, Serialize)]
pub struct ContentAdminDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    pub site_ids: Vec<DbId>,
    pub version: Option<Version>,
}

/// A content block set with its permitted blocks.
#[derive(Debug, Serialize)]
pub struct ContentBlockSetDetail {
    #[serde(flatten)]
    pub set: ContentItem,
    pub blocks: Vec<ContentItem>,
}

/// Body of a content block inline edit.
#[derive(Debug, Deserialize)]
pub struct ContentBlockUpdate {
    pub rich_content: String,
}

pub(crate) fn parse_kind(kind: &str) -> AppResult<ContentKind> {
    Ok(ContentKind::parse(kind)?)
}

fn not_found(kind: ContentKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: entity_name(kind),
        id,
    })
}

fn not_found_by_slug(kind: ContentKind, slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundBySlug {
        entity: entity_name(kind),
        slug: slug.to_string(),
    })
}

pub(crate) fn entity_name(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Content => "Content",
        ContentKind::ContentBlock => "ContentBlock",
        ContentKind::ContentBlockSet => "ContentBlockSet",
        ContentKind::Gallery => "Gallery",
    }
}

// ---------------------------------------------------------------------------
// Visitor listings
// ---------------------------------------------------------------------------

/// GET /api/v1/content/{kind}
///
/// One object per series for the current site, paginated.
pub async fn get_list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let items = ContentRepo::get_list(&state.pool, kind, state.site_scope()).await?;
    let page = PageResponse::from_items(items, &params)?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/content/{kind}/permitted
///
/// Objects visible in this deployment's mode for the current site, paginated.
pub async fn permitted(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let items =
        ContentRepo::permitted(&state.pool, kind, state.site_state(), state.site_scope()).await?;
    let page = PageResponse::from_items(items, &params)?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/v1/content/{kind}/slug/{slug}
///
/// A permitted object of the current site, with breadcrumbs and tags.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path((kind, slug)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let item = ContentRepo::permitted_by_slug(
        &state.pool,
        kind,
        &slug,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .ok_or_else(|| not_found_by_slug(kind, &slug))?;

    let listing_url = format!("/api/v1/content/{kind}");
    let breadcrumbs = render_breadcrumbs(&[
        ("Home", Some("/")),
        (entity_name(kind), Some(listing_url.as_str())),
        (item.title.as_str(), None),
    ]);
    let tags =
        TagRepo::get_tags_for_object(&state.pool, kind.as_str(), item.id, state.site_scope())
            .await?;

    Ok(Json(DataResponse {
        data: ContentDetail {
            item,
            breadcrumbs,
            tags,
        },
    }))
}

// ---------------------------------------------------------------------------
// Editor console and CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/content/{kind}/console
///
/// Every non-deleted versioned object of the kind, across all sites.
pub async fn console(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let items = ContentRepo::console(&state.pool, kind, SiteScope::All).await?;
    let page = PageResponse::from_items(items, &params)?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/content
///
/// Create a content item. With `series_id` the item becomes the next
/// (unpublished) revision of that series; otherwise it starts a new series.
pub async fn create_content(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateContentItem>,
) -> AppResult<impl IntoResponse> {
    let has_image = input
        .image_path
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty());
    let default_image = if has_image {
        None
    } else {
        DefaultImageRepo::get_random(
            &state.pool,
            input.kind.default_image_category(),
            state.site_state(),
        )
        .await?
    };

    let new_item = NewContentItem::resolve(
        &input,
        Some(editor.user_id),
        default_image,
        chrono::Utc::now(),
    )?;
    let site_ids = input
        .site_ids
        .clone()
        .unwrap_or_else(|| vec![state.site.id]);

    let item = ContentRepo::create(&state.pool, &new_item, &site_ids, input.series_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VersionSeries",
            id: input.series_id.unwrap_or_default(),
        }))?;

    tracing::info!(
        content_id = item.id,
        kind = %input.kind,
        user_id = editor.user_id,
        "Content created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// GET /api/v1/content/{kind}/{id}
///
/// Editor detail: the row, its sites, and its version.
pub async fn get_by_id(
    _editor: RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let item = ContentRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or_else(|| not_found(kind, id))?;
    let site_ids = ContentRepo::site_ids(&state.pool, id).await?;
    let version = VersionRepo::find_by_object(&state.pool, kind, id).await?;

    Ok(Json(DataResponse {
        data: ContentAdminDetail {
            item,
            site_ids,
            version,
        },
    }))
}

/// PUT /api/v1/content/{kind}/{id}
pub async fn update_content(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
    Json(input): Json<UpdateContentItem>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if input.order.is_some_and(|o| o < 0) {
        return Err(AppError::BadRequest("order must not be negative".into()));
    }

    let item = ContentRepo::update(&state.pool, kind, id, &input, Some(editor.user_id))
        .await?
        .ok_or_else(|| not_found(kind, id))?;

    tracing::info!(content_id = id, kind = %kind, user_id = editor.user_id, "Content updated");

    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

/// GET /api/v1/content-blocks/{slug}
pub async fn get_content_block(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let block = ContentRepo::permitted_by_slug(
        &state.pool,
        ContentKind::ContentBlock,
        &slug,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .ok_or_else(|| not_found_by_slug(ContentKind::ContentBlock, &slug))?;

    Ok(Json(DataResponse { data: block }))
}

/// PUT /api/v1/content-blocks/{slug}
///
/// Inline edit: replace a content block's rich content.
pub async fn update_content_block(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<ContentBlockUpdate>,
) -> AppResult<impl IntoResponse> {
    let block = ContentRepo::update_content_block_by_slug(
        &state.pool,
        &slug,
        &input.rich_content,
        Some(editor.user_id),
    )
    .await?
    .ok_or_else(|| not_found_by_slug(ContentKind::ContentBlock, &slug))?;

    tracing::info!(content_id = block.id, slug = %slug, user_id = editor.user_id, "Content block edited");

    Ok(Json(DataResponse { data: block }))
}

/// GET /api/v1/content-block-sets/{slug}
pub async fn get_content_block_set(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let set = ContentRepo::permitted_by_slug(
        &state.pool,
        ContentKind::ContentBlockSet,
        &slug,
        state.site_state(),
        state.site_scope(),
    )
    .await?
    .ok_or_else(|| not_found_by_slug(ContentKind::ContentBlockSet, &slug))?;

    let blocks = ContentRepo::permitted_blocks_of_set(
        &state.pool,
        set.id,
        state.site_state(),
        state.site_scope(),
    )
    .await?;

    Ok(Json(DataResponse {
        data: ContentBlockSetDetail { set, blocks },
    }))
}

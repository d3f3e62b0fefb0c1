//! Content item entity model and DTOs.
//!
//! One table holds every leaf content type; `kind` is the discriminator and
//! the generic content-type key used by `versions` and tag associations.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tunobase_core::content::{default_image_name, resolve_publish_at, validate_title, ContentKind};
use tunobase_core::error::CoreError;
use tunobase_core::naming::slug_or_derive;
use tunobase_core::state::ContentState;
use tunobase_core::types::{DbId, Timestamp};

/// A row from the `content_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentItem {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub slug: String,
    pub state: i16,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: i32,
    pub plain_content: Option<String>,
    pub rich_content: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub image_path: Option<String>,
    pub image_name: Option<String>,
    pub alternative_title: Option<String>,
    pub content_block_parent_id: Option<DbId>,
    pub created_by: Option<DbId>,
    pub modified_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ContentItem {
    /// Decoded lifecycle state. Unknown ids read as `Unpublished`, which no
    /// visitor query selects.
    pub fn content_state(&self) -> ContentState {
        ContentState::from_id(self.state).unwrap_or(ContentState::Unpublished)
    }
}

/// DTO for creating a content item.
///
/// Supplying `series_id` creates a new revision of existing content: the
/// item joins that series as its next version, unpublished.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContentItem {
    pub kind: ContentKind,
    pub title: String,
    pub slug: Option<String>,
    pub state: Option<ContentState>,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: Option<i32>,
    pub plain_content: Option<String>,
    pub rich_content: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub image_path: Option<String>,
    pub image_name: Option<String>,
    pub alternative_title: Option<String>,
    pub content_block_parent_id: Option<DbId>,
    /// Sites the item belongs to. Defaults to the current site.
    pub site_ids: Option<Vec<DbId>>,
    pub series_id: Option<DbId>,
}

/// DTO for updating a content item. All fields optional.
///
/// `state` is deliberately absent: state changes go through the version
/// workflow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContentItem {
    pub title: Option<String>,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: Option<i32>,
    pub plain_content: Option<String>,
    pub rich_content: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub image_path: Option<String>,
    pub image_name: Option<String>,
    pub alternative_title: Option<String>,
    pub content_block_parent_id: Option<DbId>,
}

/// Fully resolved values for an insert, after slug, state, publish time,
/// and default image have been applied.
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub kind: ContentKind,
    pub title: String,
    pub slug: String,
    pub state: ContentState,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: i32,
    pub plain_content: Option<String>,
    pub rich_content: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub image_path: Option<String>,
    pub image_name: Option<String>,
    pub alternative_title: Option<String>,
    pub content_block_parent_id: Option<DbId>,
    pub created_by: Option<DbId>,
}

impl NewContentItem {
    /// Apply the save-time rules to a create request.
    ///
    /// - the slug is derived from the title when none is given;
    /// - state defaults to `Published`, but a new revision of an existing
    ///   series always starts `Unpublished`;
    /// - published items without `publish_at` are stamped with `now`;
    /// - `default_image` fills a missing image, and an unnamed image is
    ///   named after its path and today's date.
    pub fn resolve(
        input: &CreateContentItem,
        created_by: Option<DbId>,
        default_image: Option<String>,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        validate_title(&input.title)?;
        if let Some(order) = input.order {
            if order < 0 {
                return Err(CoreError::Validation("order must not be negative".into()));
            }
        }

        let state = if input.series_id.is_some() {
            ContentState::Unpublished
        } else {
            input.state.unwrap_or(ContentState::Published)
        };

        let image_path = input
            .image_path
            .clone()
            .filter(|p| !p.trim().is_empty())
            .or(default_image);
        let image_name = match (&image_path, &input.image_name) {
            (Some(path), None) => Some(default_image_name(path, now)),
            (Some(path), Some(name)) if name.trim().is_empty() => {
                Some(default_image_name(path, now))
            }
            (_, name) => name.clone(),
        };

        Ok(Self {
            kind: input.kind,
            title: input.title.trim().to_string(),
            slug: slug_or_derive(input.slug.as_deref(), &input.title),
            state,
            publish_at: resolve_publish_at(state, input.publish_at, now),
            retract_at: input.retract_at,
            order: input.order.unwrap_or(0),
            plain_content: input.plain_content.clone(),
            rich_content: input.rich_content.clone(),
            meta_description: input.meta_description.clone(),
            meta_keywords: input.meta_keywords.clone(),
            image_path,
            image_name,
            alternative_title: input.alternative_title.clone(),
            content_block_parent_id: input.content_block_parent_id,
            created_by,
        })
    }
}

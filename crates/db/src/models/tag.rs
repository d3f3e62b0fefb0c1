//! Tag and content-object-tag models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tunobase_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub site_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `content_object_tags` junction table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentObjectTag {
    pub id: DbId,
    pub content_type: String,
    pub object_pk: DbId,
    pub site_id: DbId,
    pub tag_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A tag applied to an object, joined with its title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ObjectTag {
    pub tag_id: DbId,
    pub title: String,
    pub slug: String,
}

/// Number of tagged objects per tag title.
#[derive(Debug, Clone, FromRow, Serialize, PartialEq, Eq)]
pub struct TagCount {
    pub title: String,
    pub count: i64,
}

/// Query parameters for tag autocomplete (`?term=`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveTagsParams {
    #[serde(default)]
    pub term: String,
}

/// Body of a tag replacement request.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTagsRequest {
    pub tag_content_type: Option<String>,
    pub tag_object_pk: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
}

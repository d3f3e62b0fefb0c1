//! Banner and banner set models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tunobase_core::content::BannerKind;
use tunobase_core::state::ContentState;
use tunobase_core::types::{DbId, Timestamp};

/// A row from the `banners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Banner {
    pub id: DbId,
    pub kind: String,
    pub title: String,
    pub state: i16,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: i32,
    pub image_path: Option<String>,
    pub image_name: Option<String>,
    pub plain_content: Option<String>,
    pub rich_content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a banner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBanner {
    pub kind: BannerKind,
    pub title: String,
    pub state: Option<ContentState>,
    pub publish_at: Option<Timestamp>,
    pub order: Option<i32>,
    pub image_path: Option<String>,
    pub image_name: Option<String>,
    pub plain_content: Option<String>,
    pub rich_content: Option<String>,
    pub site_ids: Option<Vec<DbId>>,
}

/// A row from the `banner_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BannerSet {
    pub id: DbId,
    pub kind: String,
    pub slug: String,
    pub state: i16,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a banner set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBannerSet {
    pub kind: BannerKind,
    pub slug: String,
    pub state: Option<ContentState>,
    pub publish_at: Option<Timestamp>,
    pub order: Option<i32>,
    pub site_ids: Option<Vec<DbId>>,
}

/// A banner set together with its visible banners.
#[derive(Debug, Clone, Serialize)]
pub struct BannerSetWithBanners {
    #[serde(flatten)]
    pub set: BannerSet,
    pub banners: Vec<Banner>,
}

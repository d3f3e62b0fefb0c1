//! Gallery image model and DTOs. Galleries themselves are content items of
//! kind `gallery`; images link to them through `gallery_image_links`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tunobase_core::state::ContentState;
use tunobase_core::types::{DbId, Timestamp};

/// A row from the `gallery_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub image_path: String,
    pub image_name: Option<String>,
    pub state: i16,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an image to a gallery.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryImage {
    pub image_path: String,
    pub image_name: Option<String>,
    pub state: Option<ContentState>,
    pub publish_at: Option<Timestamp>,
    pub order: Option<i32>,
    pub site_ids: Option<Vec<DbId>>,
}

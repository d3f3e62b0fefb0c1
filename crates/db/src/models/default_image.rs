//! Default image model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tunobase_core::state::ContentState;
use tunobase_core::types::{DbId, Timestamp};

/// A row from the `default_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DefaultImage {
    pub id: DbId,
    pub category: String,
    pub image_path: String,
    pub state: i16,
    pub publish_at: Option<Timestamp>,
    pub retract_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a default image.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDefaultImage {
    pub category: String,
    pub image_path: String,
    pub state: Option<ContentState>,
}

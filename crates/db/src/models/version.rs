//! Version series and version models.

use serde::Serialize;
use sqlx::FromRow;
use tunobase_core::state::ContentState;
use tunobase_core::types::{DbId, Timestamp};
use tunobase_core::visibility::VersionRef;

/// A row from the `version_series` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionSeries {
    pub id: DbId,
    pub slug: String,
    pub staged_slug: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Version {
    pub id: DbId,
    pub content_type: String,
    pub object_id: DbId,
    pub series_id: DbId,
    pub number: i32,
    pub state: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Version {
    /// Project the row onto the fields visibility rules look at.
    ///
    /// Unknown state ids are treated as `Deleted` so they never surface.
    pub fn to_ref(&self) -> VersionRef {
        VersionRef {
            version_id: self.id,
            object_id: self.object_id,
            series_id: self.series_id,
            number: self.number,
            state: ContentState::from_id(self.state).unwrap_or(ContentState::Deleted),
        }
    }
}

/// Result of a version state transition.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The transition was applied; carries the updated version.
    Applied(Version),
    /// The object has no version row.
    NoVersion,
    /// The transition is not allowed from the version's current state.
    Refused(tunobase_core::error::CoreError),
}

/// A version together with the editor URL of its content object.
#[derive(Debug, Clone, Serialize)]
pub struct VersionListEntry {
    #[serde(flatten)]
    pub version: Version,
    pub change_url: String,
}

impl VersionListEntry {
    pub fn new(version: Version) -> Self {
        let change_url = format!(
            "/api/v1/content/{}/{}",
            version.content_type, version.object_id
        );
        Self {
            version,
            change_url,
        }
    }
}

//! Content lifecycle states.
//!
//! The `ContentState` enum mirrors the seeded rows in `content_states`.
//! Every versioned entity and every `versions` row carries one of these.
//!
//! ```text
//! UNPUBLISHED -> STAGED -> PUBLISHED
//!      \____________\__________\______> DELETED (terminal)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a piece of content or of one of its versions.
///
/// Discriminant values match the seeded rows in the `content_states`
/// lookup table (1-based).
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentState {
    Unpublished = 1,
    Staged = 2,
    Published = 3,
    Deleted = 4,
}

impl ContentState {
    /// Resolve a database state ID to the corresponding enum variant.
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(Self::Unpublished),
            2 => Some(Self::Staged),
            3 => Some(Self::Published),
            4 => Some(Self::Deleted),
            _ => None,
        }
    }

    /// Like [`ContentState::from_id`] but reports unknown ids as an internal error.
    pub fn try_from_id(id: i16) -> Result<Self, CoreError> {
        Self::from_id(id).ok_or_else(|| CoreError::Internal(format!("Unknown content state {id}")))
    }

    /// Return the database state ID.
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Human-readable label matching the `label` column in `content_states`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unpublished => "Unpublished",
            Self::Staged => "Staged",
            Self::Published => "Published",
            Self::Deleted => "Deleted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// The state a visitor-facing `permitted` query selects.
    ///
    /// Staging deployments preview staged content; everything else shows
    /// published content.
    pub fn site_state(staging: bool) -> Self {
        if staging {
            Self::Staged
        } else {
            Self::Published
        }
    }
}

/// Validate a version transition.
///
/// Any non-deleted state may move to any other state; `Deleted` is terminal.
pub fn validate_transition(from: ContentState, to: ContentState) -> Result<(), CoreError> {
    if from.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "Cannot move a {} version to {}",
            from.label().to_lowercase(),
            to.label().to_lowercase()
        )));
    }
    Ok(())
}

//! Content kinds, defaults, and validation shared by the DB and API layers.
//!
//! Every row in `content_items` carries a `kind` discriminator. The same
//! string is stored as `versions.content_type` and
//! `content_object_tags.content_type`, so it doubles as the generic
//! content-type key.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum length of titles and slugs.
pub const MAX_TITLE_LEN: usize = 255;

// ---------------------------------------------------------------------------
// ContentKind
// ---------------------------------------------------------------------------

/// Leaf type of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Content,
    ContentBlock,
    ContentBlockSet,
    Gallery,
}

/// All content kinds, in declaration order.
pub const ALL_KINDS: &[ContentKind] = &[
    ContentKind::Content,
    ContentKind::ContentBlock,
    ContentKind::ContentBlockSet,
    ContentKind::Gallery,
];

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::ContentBlock => "content_block",
            Self::ContentBlockSet => "content_block_set",
            Self::Gallery => "gallery",
        }
    }

    /// Parse the stored/path representation of a kind.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|k| k.as_str() == value)
            .ok_or_else(|| {
                let valid: Vec<&str> = ALL_KINDS.iter().map(|k| k.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid content kind '{value}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }

    /// Category of default image used when an item of this kind is saved
    /// without an image.
    pub fn default_image_category(&self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            _ => "content",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BannerKind
// ---------------------------------------------------------------------------

/// Banners and banner sets come in two flavours; a set only holds banners
/// of its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Image,
    Html,
}

impl BannerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Html => "html",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "image" => Ok(Self::Image),
            "html" => Ok(Self::Html),
            other => Err(CoreError::Validation(format!(
                "Invalid banner kind '{other}'. Must be one of: image, html"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation and save-time defaults
// ---------------------------------------------------------------------------

/// Validate a content title: non-blank, at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Resolve `publish_at` on save: published content without a publish
/// time is stamped with `now`.
pub fn resolve_publish_at(
    state: crate::state::ContentState,
    publish_at: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match (publish_at, state) {
        (None, crate::state::ContentState::Published) => Some(now),
        (existing, _) => existing,
    }
}

/// Display name given to an image that was saved without one.
pub fn default_image_name(image_path: &str, now: Timestamp) -> String {
    format!("{image_path} {}", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::state::ContentState;

    #[test]
    fn kind_parse_roundtrip() {
        for kind in ALL_KINDS {
            assert_eq!(ContentKind::parse(kind.as_str()).unwrap(), *kind);
        }
    }

    #[test]
    fn kind_parse_rejects_unknown() {
        let err = ContentKind::parse("banner").unwrap_err();
        assert!(err.to_string().contains("Invalid content kind 'banner'"));
    }

    #[test]
    fn gallery_uses_gallery_default_images() {
        assert_eq!(ContentKind::Gallery.default_image_category(), "gallery");
        assert_eq!(ContentKind::ContentBlock.default_image_category(), "content");
    }

    #[test]
    fn banner_kind_parse() {
        assert_eq!(BannerKind::parse("html").unwrap(), BannerKind::Html);
        assert!(BannerKind::parse("video").is_err());
    }

    #[test]
    fn blank_title_rejected() {
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
        assert!(validate_title("About us").is_ok());
    }

    #[test]
    fn published_without_publish_at_is_stamped() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            resolve_publish_at(ContentState::Published, None, now),
            Some(now)
        );
        assert_eq!(resolve_publish_at(ContentState::Unpublished, None, now), None);

        let earlier = chrono::Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            resolve_publish_at(ContentState::Published, Some(earlier), now),
            Some(earlier)
        );
    }

    #[test]
    fn default_image_name_appends_date() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            default_image_name("defaults/content.png", now),
            "defaults/content.png 2024-03-01"
        );
    }
}

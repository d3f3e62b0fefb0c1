//! Presentation helpers returned alongside detail payloads: breadcrumbs,
//! lettered markers, and gallery neighbours.

use serde::Serialize;

use crate::types::DbId;

/// Render one breadcrumb fragment.
///
/// Linked crumbs render as `&raquo;<a href='url'>title</a>`, the current
/// page as `&raquo;&nbsp;title`.
pub fn create_crumb(title: &str, url: Option<&str>) -> String {
    match url {
        Some(url) => format!("&raquo;<a href='{url}'>{title}</a>"),
        None => format!("&raquo;&nbsp;{title}"),
    }
}

/// Render a breadcrumb trail from `(title, url)` pairs.
pub fn render_breadcrumbs(crumbs: &[(&str, Option<&str>)]) -> String {
    crumbs
        .iter()
        .map(|(title, url)| create_crumb(title, *url))
        .collect()
}

/// Uppercase letter marker for a zero-based position (`0 -> "A"`).
///
/// Positions past `Z` continue through the following code points, matching
/// how the markers have always been produced.
pub fn letterify(index: u32) -> String {
    char::from_u32(65 + index)
        .map(String::from)
        .unwrap_or_default()
}

/// Neighbouring images of one image within a gallery's display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurroundingImages {
    pub previous_image_id: Option<DbId>,
    pub next_image_id: Option<DbId>,
}

/// Find the neighbours of `image_id` in `ordered_ids`.
///
/// Both neighbours are `None` when the image is not in the gallery.
pub fn surrounding_images(ordered_ids: &[DbId], image_id: DbId) -> SurroundingImages {
    let Some(pos) = ordered_ids.iter().position(|id| *id == image_id) else {
        return SurroundingImages {
            previous_image_id: None,
            next_image_id: None,
        };
    };

    SurroundingImages {
        previous_image_id: pos.checked_sub(1).map(|i| ordered_ids[i]),
        next_image_id: ordered_ids.get(pos + 1).copied(),
    }
}

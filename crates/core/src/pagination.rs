//! Page arithmetic for "load more" style listings.
//!
//! Pages are 1-based. An empty result still has one (empty) page, so the
//! first page of an empty listing is valid while any other page is not.

use serde::Serialize;

use crate::error::CoreError;

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Position of one page within a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_number: i64,
    pub num_pages: i64,
    pub has_previous: bool,
    pub has_next: bool,
    /// `0` when there is no previous page.
    pub previous_page_number: i64,
    /// `0` when there is no next page.
    pub next_page_number: i64,
    /// 1-based index of the first item on the page, `0` for an empty listing.
    pub start_index: i64,
    /// 1-based index of the last item on the page, `0` for an empty listing.
    pub end_index: i64,
}

impl PageInfo {
    /// Offset to pass to a `LIMIT/OFFSET` query for this page.
    pub fn offset(&self, per_page: i64) -> i64 {
        (self.page_number - 1) * per_page
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(requested: Option<i64>) -> i64 {
    requested.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Compute page metadata for `page` of a listing with `count` items.
///
/// Returns a `NotFound` error for pages outside the listing.
pub fn paginate(count: i64, page: i64, per_page: i64) -> Result<PageInfo, CoreError> {
    let per_page = per_page.max(1);
    let num_pages = if count <= 0 {
        1
    } else {
        (count + per_page - 1) / per_page
    };

    if page < 1 || page > num_pages {
        return Err(CoreError::NotFound {
            entity: "Page",
            id: page,
        });
    }

    let has_previous = page > 1;
    let has_next = page < num_pages;
    let (start_index, end_index) = if count <= 0 {
        (0, 0)
    } else {
        let start = (page - 1) * per_page + 1;
        let end = if page == num_pages {
            count
        } else {
            page * per_page
        };
        (start, end)
    };

    Ok(PageInfo {
        page_number: page,
        num_pages,
        has_previous,
        has_next,
        previous_page_number: if has_previous { page - 1 } else { 0 },
        next_page_number: if has_next { page + 1 } else { 0 },
        start_index,
        end_index,
    })
}

//! Shared query parameter types for API handlers.

use serde::Deserialize;
use tunobase_core::pagination::clamp_page_size;
use tunobase_core::state::ContentState;

/// Page-number pagination parameters (`?page=&paginate_by=`).
///
/// Pages are 1-based; `paginate_by` is clamped by
/// [`clamp_page_size`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub paginate_by: Option<i64>,
}

impl PageParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> i64 {
        clamp_page_size(self.paginate_by)
    }
}

/// Optional state filter (`?state=published`).
#[derive(Debug, Deserialize)]
pub struct StateParams {
    pub state: Option<ContentState>,
}

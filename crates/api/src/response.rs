//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project conventions.
//! Use [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;
use tunobase_core::error::CoreError;
use tunobase_core::pagination::{paginate, PageInfo};

use crate::query::PageParams;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing plus the "load more" metadata clients use to
/// fetch the next page.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub object_list: Vec<T>,
    #[serde(flatten)]
    pub page: PageInfo,
}

impl<T: Serialize> PageResponse<T> {
    /// Slice an already-loaded listing down to the requested page.
    ///
    /// Pages outside the listing are reported as `NotFound`.
    pub fn from_items(items: Vec<T>, params: &PageParams) -> Result<Self, CoreError> {
        let per_page = params.per_page();
        let page = paginate(items.len() as i64, params.page(), per_page)?;
        let object_list = items
            .into_iter()
            .skip(page.offset(per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok(Self { object_list, page })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn params(page: i64, paginate_by: i64) -> PageParams {
        PageParams {
            page: Some(page),
            paginate_by: Some(paginate_by),
        }
    }

    #[test]
    fn middle_page_is_sliced() {
        let items: Vec<i32> = (1..=25).collect();
        let resp = PageResponse::from_items(items, &params(2, 10)).unwrap();
        assert_eq!(resp.object_list, (11..=20).collect::<Vec<_>>());
        assert!(resp.page.has_previous);
        assert!(resp.page.has_next);
        assert_eq!(resp.page.next_page_number, 3);
    }

    #[test]
    fn last_page_is_short() {
        let items: Vec<i32> = (1..=25).collect();
        let resp = PageResponse::from_items(items, &params(3, 10)).unwrap();
        assert_eq!(resp.object_list, vec![21, 22, 23, 24, 25]);
        assert!(!resp.page.has_next);
        assert_eq!(resp.page.end_index, 25);
    }

    #[test]
    fn page_past_the_end_is_not_found() {
        let items: Vec<i32> = (1..=5).collect();
        assert_matches!(
            PageResponse::from_items(items, &params(2, 10)),
            Err(CoreError::NotFound { .. })
        );
    }

    #[test]
    fn page_metadata_is_flattened() {
        let resp = PageResponse::from_items(vec!["a"], &PageParams::default()).unwrap();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["object_list"], serde_json::json!(["a"]));
        assert_eq!(json["page_number"], 1);
        assert_eq!(json["previous_page_number"], 0);
    }
}

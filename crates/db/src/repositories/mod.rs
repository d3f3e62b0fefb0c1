//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod banner_repo;
pub mod content_repo;
pub mod default_image_repo;
pub mod gallery_repo;
pub mod outbound_email_repo;
pub mod site_repo;
pub mod tag_repo;
pub mod user_repo;
pub mod version_repo;

pub use banner_repo::BannerRepo;
pub use content_repo::ContentRepo;
pub use default_image_repo::DefaultImageRepo;
pub use gallery_repo::GalleryRepo;
pub use outbound_email_repo::OutboundEmailRepo;
pub use site_repo::SiteRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
pub use version_repo::VersionRepo;

/// Nullable site filter over a `<entity>_sites` join table.
///
/// `$n` is bound to `SiteScope::site_id()`; a NULL bind disables the filter.
pub(crate) fn site_filter(join_table: &str, fk_column: &str, alias: &str, param: usize) -> String {
    format!(
        "(${param}::BIGINT IS NULL OR EXISTS (\
            SELECT 1 FROM {join_table} st \
            WHERE st.{fk_column} = {alias}.id AND st.site_id = ${param}))"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_filter_references_join_table() {
        let sql = site_filter("banner_sites", "banner_id", "b", 2);
        assert!(sql.starts_with("($2::BIGINT IS NULL"));
        assert!(sql.contains("FROM banner_sites st"));
        assert!(sql.contains("st.banner_id = b.id AND st.site_id = $2"));
    }
}

//! Site scoping for multi-site queries.
//!
//! Entities either carry a many-to-many `sites` relation (content items,
//! gallery images, banners, banner sets) or a direct `site_id` column
//! (tags, tag associations, outbound emails). Repositories accept a
//! [`SiteScope`] and translate it to the matching filter.

use crate::types::DbId;

/// Restricts a query to one site, or leaves it unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SiteScope {
    #[default]
    All,
    Site(DbId),
}

impl SiteScope {
    /// The site id to bind, `None` for an unrestricted query.
    ///
    /// Repositories bind this as a nullable parameter and filter with
    /// `($n::BIGINT IS NULL OR ...)` so one statement serves both cases.
    pub fn site_id(&self) -> Option<DbId> {
        match self {
            Self::All => None,
            Self::Site(id) => Some(*id),
        }
    }
}

impl From<Option<DbId>> for SiteScope {
    fn from(value: Option<DbId>) -> Self {
        value.map_or(Self::All, Self::Site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_is_unrestricted() {
        assert_eq!(SiteScope::default(), SiteScope::All);
        assert_eq!(SiteScope::All.site_id(), None);
    }

    #[test]
    fn site_scope_binds_its_id() {
        assert_eq!(SiteScope::Site(7).site_id(), Some(7));
        assert_eq!(SiteScope::from(Some(3)), SiteScope::Site(3));
        assert_eq!(SiteScope::from(None), SiteScope::All);
    }
}

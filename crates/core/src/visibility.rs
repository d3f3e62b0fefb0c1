//! Version visibility resolution and promotion planning.
//!
//! Pure functions over the `versions` rows of one content kind. The DB
//! layer loads the rows, calls into this module, and applies the result;
//! keeping the rules here lets them be tested without a database.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::state::{validate_transition, ContentState};
use crate::types::DbId;

/// The subset of a `versions` row that visibility decisions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRef {
    pub version_id: DbId,
    pub object_id: DbId,
    pub series_id: DbId,
    pub number: i32,
    pub state: ContentState,
}

/// Resolve which objects a visitor listing shows, at most one per series.
///
/// Tiers, by descending priority:
/// 1. every object whose version is `Published`;
/// 2. for series absent from tier 1, objects whose version is `Staged`;
/// 3. for series absent from both, the unpublished object with the lowest
///    version number, so every series shows something before first publish.
///
/// `Deleted` versions never contribute. Returned ids follow tier order.
pub fn resolve_visible(versions: &[VersionRef]) -> Vec<DbId> {
    let mut ids = Vec::new();
    let mut covered: HashSet<DbId> = HashSet::new();

    for tier in [ContentState::Published, ContentState::Staged] {
        let mut tier_series = Vec::new();
        for v in versions.iter().filter(|v| v.state == tier) {
            if !covered.contains(&v.series_id) {
                ids.push(v.object_id);
                tier_series.push(v.series_id);
            }
        }
        covered.extend(tier_series);
    }

    let mut bottom: Vec<&VersionRef> = versions
        .iter()
        .filter(|v| v.state == ContentState::Unpublished && !covered.contains(&v.series_id))
        .collect();
    bottom.sort_by_key(|v| (v.series_id, v.number));
    for v in bottom {
        if covered.insert(v.series_id) {
            ids.push(v.object_id);
        }
    }

    ids
}

// ---------------------------------------------------------------------------
// Promotion planning
// ---------------------------------------------------------------------------

/// State changes required to move one version of a series to a new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// The version being moved.
    pub target: VersionRef,
    /// The state it moves to.
    pub to: ContentState,
    /// Sibling versions that currently hold `to` and must drop to
    /// `Unpublished` first.
    pub demote: Vec<VersionRef>,
}

/// Plan a transition of `object_id` to `to` within its series.
///
/// `series` must be every version of the target's series. `Staged` and
/// `Published` are exclusive per series, so any sibling holding the target
/// state is demoted. `Unpublished` and `Deleted` demote nothing.
pub fn plan_transition(
    series: &[VersionRef],
    object_id: DbId,
    to: ContentState,
) -> Result<TransitionPlan, CoreError> {
    let target = series
        .iter()
        .copied()
        .find(|v| v.object_id == object_id)
        .ok_or(CoreError::NotFound {
            entity: "Version",
            id: object_id,
        })?;

    validate_transition(target.state, to)?;

    let demote = match to {
        ContentState::Staged | ContentState::Published => series
            .iter()
            .copied()
            .filter(|v| v.state == to && v.version_id != target.version_id)
            .collect(),
        ContentState::Unpublished | ContentState::Deleted => Vec::new(),
    };

    Ok(TransitionPlan { target, to, demote })
}

/// Check the exclusivity invariant: at most one `Published` and at most one
/// `Staged` version per series.
pub fn check_series_invariant(versions: &[VersionRef]) -> Result<(), CoreError> {
    let mut published = HashSet::new();
    let mut staged = HashSet::new();
    for v in versions {
        let seen = match v.state {
            ContentState::Published => &mut published,
            ContentState::Staged => &mut staged,
            _ => continue,
        };
        if !seen.insert(v.series_id) {
            return Err(CoreError::Conflict(format!(
                "Series {} has more than one {} version",
                v.series_id,
                v.state.label().to_lowercase()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn v(version_id: DbId, object_id: DbId, series_id: DbId, number: i32, state: ContentState) -> VersionRef {
        VersionRef {
            version_id,
            object_id,
            series_id,
            number,
            state,
        }
    }

    /// Apply a plan to an in-memory series, mirroring what the repository does.
    fn apply(series: &mut [VersionRef], plan: &TransitionPlan) {
        for d in &plan.demote {
            if let Some(row) = series.iter_mut().find(|r| r.version_id == d.version_id) {
                row.state = ContentState::Unpublished;
            }
        }
        if let Some(row) = series
            .iter_mut()
            .find(|r| r.version_id == plan.target.version_id)
        {
            row.state = plan.to;
        }
    }

    // -- resolve_visible -----------------------------------------------------

    #[test]
    fn published_wins_over_staged_and_unpublished() {
        let versions = [
            v(1, 10, 1, 1, ContentState::Published),
            v(2, 11, 1, 2, ContentState::Staged),
            v(3, 12, 1, 3, ContentState::Unpublished),
        ];
        assert_eq!(resolve_visible(&versions), vec![10]);
    }

    #[test]
    fn staged_shown_when_nothing_published() {
        let versions = [
            v(1, 10, 1, 1, ContentState::Unpublished),
            v(2, 11, 1, 2, ContentState::Staged),
        ];
        assert_eq!(resolve_visible(&versions), vec![11]);
    }

    #[test]
    fn oldest_unpublished_is_the_fallback() {
        let versions = [
            v(3, 12, 1, 3, ContentState::Unpublished),
            v(1, 10, 1, 1, ContentState::Unpublished),
            v(2, 11, 1, 2, ContentState::Unpublished),
        ];
        assert_eq!(resolve_visible(&versions), vec![10]);
    }

    #[test]
    fn one_object_per_series_across_many_series() {
        let versions = [
            v(1, 10, 1, 1, ContentState::Published),
            v(2, 20, 2, 1, ContentState::Staged),
            v(3, 30, 3, 1, ContentState::Unpublished),
            v(4, 31, 3, 2, ContentState::Unpublished),
            v(5, 11, 1, 2, ContentState::Unpublished),
        ];
        assert_eq!(resolve_visible(&versions), vec![10, 20, 30]);
    }

    #[test]
    fn deleted_versions_never_visible() {
        let versions = [
            v(1, 10, 1, 1, ContentState::Deleted),
            v(2, 20, 2, 1, ContentState::Deleted),
            v(3, 21, 2, 2, ContentState::Unpublished),
        ];
        assert_eq!(resolve_visible(&versions), vec![21]);
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        assert!(resolve_visible(&[]).is_empty());
    }

    // -- plan_transition -----------------------------------------------------

    #[test]
    fn publishing_demotes_previous_published_sibling() {
        let series = [
            v(1, 10, 1, 1, ContentState::Published),
            v(2, 11, 1, 2, ContentState::Unpublished),
        ];
        let plan = plan_transition(&series, 11, ContentState::Published).unwrap();
        assert_eq!(plan.demote, vec![series[0]]);
        assert_eq!(plan.target.object_id, 11);
    }

    #[test]
    fn staging_leaves_published_sibling_alone() {
        let mut series = [
            v(1, 10, 1, 1, ContentState::Published),
            v(2, 11, 1, 2, ContentState::Unpublished),
        ];
        let plan = plan_transition(&series, 11, ContentState::Staged).unwrap();
        assert!(plan.demote.is_empty());
        apply(&mut series, &plan);

        assert_eq!(series[0].state, ContentState::Published);
        assert_eq!(series[1].state, ContentState::Staged);
        assert_eq!(
            resolve_permitted(&series, ContentState::site_state(false)),
            vec![10]
        );
        assert_eq!(resolve_visible(&series), vec![10]);
    }

    #[test]
    fn republishing_the_published_version_demotes_nothing() {
        let series = [v(1, 10, 1, 1, ContentState::Published)];
        let plan = plan_transition(&series, 10, ContentState::Published).unwrap();
        assert!(plan.demote.is_empty());
    }

    #[test]
    fn unknown_object_is_not_found() {
        let series = [v(1, 10, 1, 1, ContentState::Published)];
        assert_matches!(
            plan_transition(&series, 99, ContentState::Staged),
            Err(CoreError::NotFound { entity: "Version", id: 99 })
        );
    }

    #[test]
    fn deleted_version_cannot_be_promoted() {
        let series = [v(1, 10, 1, 1, ContentState::Deleted)];
        assert_matches!(
            plan_transition(&series, 10, ContentState::Published),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn invariant_holds_after_any_stage_publish_sequence() {
        let mut series = [
            v(1, 10, 1, 1, ContentState::Unpublished),
            v(2, 11, 1, 2, ContentState::Unpublished),
            v(3, 12, 1, 3, ContentState::Unpublished),
        ];
        let steps = [
            (10, ContentState::Published),
            (11, ContentState::Staged),
            (12, ContentState::Staged),
            (11, ContentState::Published),
            (12, ContentState::Published),
            (10, ContentState::Staged),
            (10, ContentState::Published),
        ];
        for (object_id, to) in steps {
            let plan = plan_transition(&series, object_id, to).unwrap();
            apply(&mut series, &plan);
            check_series_invariant(&series).unwrap();
        }
        assert_eq!(series[0].state, ContentState::Published);
        assert_eq!(series[1].state, ContentState::Unpublished);
        assert_eq!(series[2].state, ContentState::Unpublished);
    }

    #[test]
    fn deleting_only_published_falls_back_to_unpublished_sibling() {
        let mut series = [
            v(1, 10, 1, 1, ContentState::Published),
            v(2, 11, 1, 2, ContentState::Unpublished),
        ];
        let plan = plan_transition(&series, 10, ContentState::Deleted).unwrap();
        apply(&mut series, &plan);
        assert_eq!(resolve_visible(&series), vec![11]);

        let lone = [v(3, 20, 2, 1, ContentState::Deleted)];
        assert!(resolve_visible(&lone).is_empty());
    }

    #[test]
    fn invariant_violation_detected() {
        let versions = [
            v(1, 10, 1, 1, ContentState::Published),
            v(2, 11, 1, 2, ContentState::Published),
        ];
        assert_matches!(check_series_invariant(&versions), Err(CoreError::Conflict(_)));
    }
}

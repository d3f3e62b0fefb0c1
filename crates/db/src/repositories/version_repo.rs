//! Repository for the `version_series` and `versions` tables.
//!
//! Implements the version state machine. Every transition runs in one
//! transaction that locks the series row, so concurrent stage/publish calls
//! on the same series serialize and the one-published/one-staged rule holds.
//! The new state is mirrored onto the content item the version points at.

use sqlx::{PgConnection, PgPool};
use tunobase_core::content::ContentKind;
use tunobase_core::naming::slugify;
use tunobase_core::state::ContentState;
use tunobase_core::types::DbId;
use tunobase_core::visibility::{plan_transition, VersionRef};

use crate::models::version::{TransitionOutcome, Version, VersionListEntry, VersionSeries};

/// Column list for `versions` queries.
const COLUMNS: &str = "id, content_type, object_id, series_id, number, state, created_at, updated_at";

/// Column list for `version_series` queries.
const SERIES_COLUMNS: &str = "id, slug, staged_slug, created_at, updated_at";

/// Version series bookkeeping and state transitions.
pub struct VersionRepo;

impl VersionRepo {
    // -----------------------------------------------------------------------
    // Series and version creation
    // -----------------------------------------------------------------------

    /// Create an empty version series.
    pub async fn add_series(pool: &PgPool, slug: &str) -> Result<VersionSeries, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert_series(&mut *conn, slug).await
    }

    async fn insert_series(conn: &mut PgConnection, slug: &str) -> Result<VersionSeries, sqlx::Error> {
        let query = format!(
            "INSERT INTO version_series (slug) VALUES ($1) RETURNING {SERIES_COLUMNS}"
        );
        sqlx::query_as::<_, VersionSeries>(&query)
            .bind(slug)
            .fetch_one(conn)
            .await
    }

    /// Start a new series for a freshly created object: series slug derived
    /// from `title`, first version numbered 1 carrying the object's state.
    pub async fn add_version(
        conn: &mut PgConnection,
        kind: ContentKind,
        object_id: DbId,
        title: &str,
        state: ContentState,
    ) -> Result<Version, sqlx::Error> {
        let series = Self::insert_series(&mut *conn, &slugify(title)).await?;

        let query = format!(
            "INSERT INTO versions (content_type, object_id, series_id, number, state) \
             VALUES ($1, $2, $3, 1, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(kind.as_str())
            .bind(object_id)
            .bind(series.id)
            .bind(state.id())
            .fetch_one(conn)
            .await
    }

    /// Append `object_id` to an existing series as its next, unpublished version.
    ///
    /// Returns `None` when the series does not exist or already holds
    /// versions of another kind. The series row is locked while the next
    /// number is computed.
    pub async fn add_to_series(
        conn: &mut PgConnection,
        series_id: DbId,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let locked: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM version_series WHERE id = $1 FOR UPDATE")
                .bind(series_id)
                .fetch_optional(&mut *conn)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let (foreign,): (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                SELECT 1 FROM versions WHERE series_id = $1 AND content_type <> $2 \
             )",
        )
        .bind(series_id)
        .bind(kind.as_str())
        .fetch_one(&mut *conn)
        .await?;
        if foreign {
            tracing::warn!(
                series_id,
                content_type = kind.as_str(),
                "Refusing to mix content kinds in one series"
            );
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO versions (content_type, object_id, series_id, number, state) \
             VALUES ( \
                $1, $2, $3, \
                (SELECT COALESCE(MAX(number), 0) + 1 FROM versions WHERE series_id = $3), \
                $4 \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(kind.as_str())
            .bind(object_id)
            .bind(series_id)
            .bind(ContentState::Unpublished.id())
            .fetch_one(conn)
            .await
            .map(Some)
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// The version row of an object, if it has one.
    pub async fn find_by_object(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_by_object_in(&mut *conn, kind, object_id).await
    }

    async fn find_by_object_in(
        conn: &mut PgConnection,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<Option<Version>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions WHERE content_type = $1 AND object_id = $2"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(kind.as_str())
            .bind(object_id)
            .fetch_optional(conn)
            .await
    }

    /// The series an object's version belongs to, `None` if it has no version.
    pub async fn get_series(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<Option<VersionSeries>, sqlx::Error> {
        sqlx::query_as::<_, VersionSeries>(
            "SELECT s.id, s.slug, s.staged_slug, s.created_at, s.updated_at \
             FROM version_series s \
             JOIN versions v ON v.series_id = s.id \
             WHERE v.content_type = $1 AND v.object_id = $2",
        )
        .bind(kind.as_str())
        .bind(object_id)
        .fetch_optional(pool)
        .await
    }

    /// All versions of a series, ordered by number ascending.
    pub async fn list_for_series(
        pool: &PgPool,
        series_id: DbId,
    ) -> Result<Vec<Version>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_for_series_in(&mut *conn, series_id).await
    }

    async fn list_for_series_in(
        conn: &mut PgConnection,
        series_id: DbId,
    ) -> Result<Vec<Version>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions WHERE series_id = $1 ORDER BY number ASC"
        );
        sqlx::query_as::<_, Version>(&query)
            .bind(series_id)
            .fetch_all(conn)
            .await
    }

    /// Versions in `state` from the series of `object_id`, each with its
    /// editor URL. Empty when the object has no series.
    pub async fn version_list(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
        state: ContentState,
    ) -> Result<Vec<VersionListEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions \
             WHERE state = $3 AND series_id = ( \
                SELECT series_id FROM versions WHERE content_type = $1 AND object_id = $2 \
             ) \
             ORDER BY number ASC"
        );
        let versions = sqlx::query_as::<_, Version>(&query)
            .bind(kind.as_str())
            .bind(object_id)
            .bind(state.id())
            .fetch_all(pool)
            .await?;
        Ok(versions.into_iter().map(VersionListEntry::new).collect())
    }

    /// Every non-deleted version of a content kind, as input to visibility
    /// resolution.
    pub async fn list_refs_for_kind(
        pool: &PgPool,
        kind: ContentKind,
    ) -> Result<Vec<VersionRef>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM versions \
             WHERE content_type = $1 AND state <> $2 \
             ORDER BY series_id, number"
        );
        let versions = sqlx::query_as::<_, Version>(&query)
            .bind(kind.as_str())
            .bind(ContentState::Deleted.id())
            .fetch_all(pool)
            .await?;
        Ok(versions.iter().map(Version::to_ref).collect())
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Stage an object's version, demoting the series' current staged version.
    pub async fn stage_version(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        Self::transition(pool, kind, object_id, ContentState::Staged).await
    }

    /// Publish an object's version, demoting the series' current published version.
    pub async fn publish_version(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        Self::transition(pool, kind, object_id, ContentState::Published).await
    }

    /// Unpublish an object's version. The object's `publish_at` is reset to now.
    pub async fn unpublish_version(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        Self::transition(pool, kind, object_id, ContentState::Unpublished).await
    }

    /// Mark an object's version (and the object) deleted. Terminal.
    pub async fn delete_version(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        Self::transition(pool, kind, object_id, ContentState::Deleted).await
    }

    /// Move the version of `object_id` to `to` within a single transaction.
    ///
    /// Siblings holding `to` (staged or published only) are demoted to
    /// unpublished before the target is promoted, so the partial unique
    /// indexes never see two holders.
    pub async fn transition(
        pool: &PgPool,
        kind: ContentKind,
        object_id: DbId,
        to: ContentState,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(version) = Self::find_by_object_in(&mut *tx, kind, object_id).await? else {
            return Ok(TransitionOutcome::NoVersion);
        };

        sqlx::query("SELECT id FROM version_series WHERE id = $1 FOR UPDATE")
            .bind(version.series_id)
            .execute(&mut *tx)
            .await?;

        // Re-read under the lock; the series may have moved since the lookup.
        let series: Vec<VersionRef> = Self::list_for_series_in(&mut *tx, version.series_id)
            .await?
            .iter()
            .filter(|v| v.content_type == kind.as_str())
            .map(Version::to_ref)
            .collect();

        let plan = match plan_transition(&series, object_id, to) {
            Ok(plan) => plan,
            Err(err) => return Ok(TransitionOutcome::Refused(err)),
        };

        if !plan.demote.is_empty() {
            let version_ids: Vec<DbId> = plan.demote.iter().map(|v| v.version_id).collect();
            let object_ids: Vec<DbId> = plan.demote.iter().map(|v| v.object_id).collect();

            sqlx::query("UPDATE versions SET state = $2 WHERE id = ANY($1)")
                .bind(&version_ids)
                .bind(ContentState::Unpublished.id())
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE content_items SET state = $2 WHERE id = ANY($1) AND kind = $3")
                .bind(&object_ids)
                .bind(ContentState::Unpublished.id())
                .bind(kind.as_str())
                .execute(&mut *tx)
                .await?;
        }

        let query = format!("UPDATE versions SET state = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let updated = sqlx::query_as::<_, Version>(&query)
            .bind(plan.target.version_id)
            .bind(to.id())
            .fetch_one(&mut *tx)
            .await?;

        // Unpublishing restamps publish_at; publishing stamps it if unset.
        sqlx::query(
            "UPDATE content_items SET \
                state = $2, \
                publish_at = CASE \
                    WHEN $2 = 1 THEN NOW() \
                    WHEN $2 = 3 THEN COALESCE(publish_at, NOW()) \
                    ELSE publish_at \
                END \
             WHERE id = $1 AND kind = $3",
        )
        .bind(object_id)
        .bind(to.id())
        .bind(kind.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            content_type = kind.as_str(),
            object_id,
            series_id = updated.series_id,
            from = plan.target.state.label(),
            to = to.label(),
            demoted = plan.demote.len(),
            "Version transitioned"
        );

        Ok(TransitionOutcome::Applied(updated))
    }

    // -----------------------------------------------------------------------
    // Scheduled publishing
    // -----------------------------------------------------------------------

    /// Publish every due version whose series has nothing published.
    ///
    /// A version is due when it is neither published nor deleted and its
    /// object's `publish_at` has passed. At most one version per series is
    /// picked (latest `publish_at`, then highest number). The update
    /// re-checks for a published sibling so a concurrent publish between
    /// the scan and the update is respected. Returns the number of
    /// versions published.
    pub async fn publish_objects(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let due: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT ON (v.series_id) v.id \
             FROM versions v \
             JOIN content_items c ON c.id = v.object_id AND c.kind = v.content_type \
             WHERE v.state IN ($1, $2) \
               AND c.state <> $4 \
               AND c.publish_at IS NOT NULL AND c.publish_at <= NOW() \
               AND NOT EXISTS ( \
                   SELECT 1 FROM versions p WHERE p.series_id = v.series_id AND p.state = $3 \
               ) \
             ORDER BY v.series_id, c.publish_at DESC, v.number DESC",
        )
        .bind(ContentState::Unpublished.id())
        .bind(ContentState::Staged.id())
        .bind(ContentState::Published.id())
        .bind(ContentState::Deleted.id())
        .fetch_all(&mut *tx)
        .await?;

        if due.is_empty() {
            tx.commit().await?;
            return Ok(0);
        }

        let ids: Vec<DbId> = due.into_iter().map(|(id,)| id).collect();

        let published: Vec<(String, DbId)> = sqlx::query_as(
            "UPDATE versions v SET state = $2 \
             WHERE v.id = ANY($1) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM versions p \
                   WHERE p.series_id = v.series_id AND p.state = $2 AND p.id <> v.id \
               ) \
             RETURNING v.content_type, v.object_id",
        )
        .bind(&ids)
        .bind(ContentState::Published.id())
        .fetch_all(&mut *tx)
        .await?;

        for (content_type, object_id) in &published {
            sqlx::query("UPDATE content_items SET state = $3 WHERE id = $1 AND kind = $2")
                .bind(object_id)
                .bind(content_type)
                .bind(ContentState::Published.id())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        let count = published.len() as u64;
        tracing::info!(count, "Published scheduled versions");
        Ok(count)
    }
}

//! Repository for the `tags` and `content_object_tags` tables.
//!
//! Tags are defined per site and attached to any content object through a
//! generic `(content_type, object_pk)` reference.

use sqlx::PgPool;
use tunobase_core::naming::slugify;
use tunobase_core::site::SiteScope;
use tunobase_core::types::DbId;

use crate::models::tag::{ObjectTag, Tag, TagCount};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, title, slug, description, site_id, created_at, updated_at";

/// Tag definitions and object-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag definitions
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Titles of the site's tags containing `term`, case-insensitively.
    pub async fn retrieve_tags(
        pool: &PgPool,
        site_id: DbId,
        term: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT title FROM tags \
             WHERE site_id = $1 AND title ILIKE $2 ESCAPE '\\' \
             ORDER BY title",
        )
        .bind(site_id)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(title,)| title).collect())
    }

    /// Delete a tag definition and, by cascade, its associations.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Object associations
    // -----------------------------------------------------------------------

    /// Tags attached to one object.
    pub async fn get_tags_for_object(
        pool: &PgPool,
        content_type: &str,
        object_pk: DbId,
        scope: SiteScope,
    ) -> Result<Vec<ObjectTag>, sqlx::Error> {
        sqlx::query_as::<_, ObjectTag>(
            "SELECT t.id AS tag_id, t.title, t.slug \
             FROM content_object_tags ot \
             JOIN tags t ON t.id = ot.tag_id \
             WHERE ot.content_type = $1 AND ot.object_pk = $2 \
               AND ($3::BIGINT IS NULL OR ot.site_id = $3) \
             ORDER BY t.title",
        )
        .bind(content_type)
        .bind(object_pk)
        .bind(scope.site_id())
        .fetch_all(pool)
        .await
    }

    /// Distinct tag titles used by objects of `content_type`.
    pub async fn get_unique_tags_for_object_type(
        pool: &PgPool,
        content_type: &str,
        scope: SiteScope,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT t.title \
             FROM content_object_tags ot \
             JOIN tags t ON t.id = ot.tag_id \
             WHERE ot.content_type = $1 AND ($2::BIGINT IS NULL OR ot.site_id = $2) \
             ORDER BY t.title",
        )
        .bind(content_type)
        .bind(scope.site_id())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(title,)| title).collect())
    }

    /// Number of tagged objects of `content_type` per tag title.
    pub async fn get_tag_counts_for_object_type(
        pool: &PgPool,
        content_type: &str,
        scope: SiteScope,
    ) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            "SELECT t.title, COUNT(DISTINCT ot.object_pk) AS count \
             FROM content_object_tags ot \
             JOIN tags t ON t.id = ot.tag_id \
             WHERE ot.content_type = $1 AND ($2::BIGINT IS NULL OR ot.site_id = $2) \
             GROUP BY t.title \
             ORDER BY t.title",
        )
        .bind(content_type)
        .bind(scope.site_id())
        .fetch_all(pool)
        .await
    }

    /// Replace every tag on an object for one site.
    ///
    /// Existing associations are removed, each distinct non-blank title is
    /// resolved to the site's tag (created if missing), and the new
    /// associations are inserted, all in one transaction. Replacements of
    /// the same object serialize on a transaction-scoped advisory lock, so
    /// the last writer's set wins. Returns the tags now attached.
    pub async fn replace_tags(
        pool: &PgPool,
        site_id: DbId,
        content_type: &str,
        object_pk: DbId,
        titles: &[String],
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let titles = distinct_titles(titles);
        let slugs: Vec<String> = titles.iter().map(|t| slugify(t)).collect();

        let mut tx = pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1 || ':' || $2::TEXT, 0))")
            .bind(content_type)
            .bind(object_pk)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM content_object_tags \
             WHERE site_id = $1 AND content_type = $2 AND object_pk = $3",
        )
        .bind(site_id)
        .bind(content_type)
        .bind(object_pk)
        .execute(&mut *tx)
        .await?;

        let tags = if titles.is_empty() {
            Vec::new()
        } else {
            // Get-or-create in one statement; the no-op update makes
            // RETURNING include rows that already existed.
            let query = format!(
                "INSERT INTO tags (title, slug, site_id) \
                 SELECT t.title, t.slug, $3 FROM UNNEST($1::TEXT[], $2::TEXT[]) AS t(title, slug) \
                 ON CONFLICT ON CONSTRAINT uq_tags_title_site DO UPDATE SET title = EXCLUDED.title \
                 RETURNING {TAG_COLUMNS}"
            );
            let mut tags = sqlx::query_as::<_, Tag>(&query)
                .bind(&titles)
                .bind(&slugs)
                .bind(site_id)
                .fetch_all(&mut *tx)
                .await?;
            tags.sort_by(|a, b| a.title.cmp(&b.title));

            let tag_ids: Vec<DbId> = tags.iter().map(|t| t.id).collect();
            sqlx::query(
                "INSERT INTO content_object_tags (content_type, object_pk, site_id, tag_id) \
                 SELECT $1, $2, $3, UNNEST($4::BIGINT[]) \
                 ON CONFLICT ON CONSTRAINT uq_content_object_tags DO NOTHING",
            )
            .bind(content_type)
            .bind(object_pk)
            .bind(site_id)
            .bind(&tag_ids)
            .execute(&mut *tx)
            .await?;

            tags
        };

        tx.commit().await?;

        tracing::info!(
            content_type,
            object_pk,
            site_id,
            tag_count = tags.len(),
            "Object tags replaced"
        );
        Ok(tags)
    }
}

/// Trim titles, drop blanks, and de-duplicate while keeping first occurrence order.
fn distinct_titles(titles: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    titles
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

/// Escape `LIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

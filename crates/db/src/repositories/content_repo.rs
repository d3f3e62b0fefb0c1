//! Repository for the `content_items` table.
//!
//! Visitor-facing reads come in two flavours: `get_list` (one object per
//! version series, resolved by [`resolve_visible`]) and `permitted` (objects
//! whose version is in the site state). Deleted items never surface in
//! either.

use sqlx::PgPool;
use tunobase_core::content::ContentKind;
use tunobase_core::site::SiteScope;
use tunobase_core::state::ContentState;
use tunobase_core::types::DbId;
use tunobase_core::visibility::resolve_visible;

use crate::models::content::{ContentItem, NewContentItem, UpdateContentItem};
use crate::repositories::{site_filter, VersionRepo};

/// Column list shared across queries, qualified with the `c` alias.
const COLUMNS: &str = "c.id, c.kind, c.title, c.slug, c.state, c.publish_at, c.retract_at, \
    c.\"order\", c.plain_content, c.rich_content, c.meta_description, c.meta_keywords, \
    c.image_path, c.image_name, c.alternative_title, c.content_block_parent_id, \
    c.created_by, c.modified_by, c.created_at, c.updated_at";

/// Listing order for every visitor and console query.
const ORDER_BY: &str = "ORDER BY c.\"order\" ASC, c.publish_at DESC NULLS LAST, c.id ASC";

/// Content CRUD and visibility-filtered reads.
pub struct ContentRepo;

impl ContentRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a content item, attach it to `site_ids`, and register its version.
    ///
    /// Without `series_id` the item starts a new series; with it, the item
    /// is appended to that series. Returns `None` (and writes nothing) when
    /// `series_id` names a series that does not exist or that holds another
    /// kind of content.
    pub async fn create(
        pool: &PgPool,
        input: &NewContentItem,
        site_ids: &[DbId],
        series_id: Option<DbId>,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO content_items AS c \
                (kind, title, slug, state, publish_at, retract_at, \"order\", plain_content, \
                 rich_content, meta_description, meta_keywords, image_path, image_name, \
                 alternative_title, content_block_parent_id, created_by, modified_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16) \
             RETURNING {COLUMNS}"
        );
        let item = sqlx::query_as::<_, ContentItem>(&query)
            .bind(input.kind.as_str())
            .bind(&input.title)
            .bind(&input.slug)
            .bind(input.state.id())
            .bind(input.publish_at)
            .bind(input.retract_at)
            .bind(input.order)
            .bind(&input.plain_content)
            .bind(&input.rich_content)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .bind(&input.image_path)
            .bind(&input.image_name)
            .bind(&input.alternative_title)
            .bind(input.content_block_parent_id)
            .bind(input.created_by)
            .fetch_one(&mut *tx)
            .await?;

        if !site_ids.is_empty() {
            sqlx::query(
                "INSERT INTO content_item_sites (content_item_id, site_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT ON CONSTRAINT uq_content_item_sites DO NOTHING",
            )
            .bind(item.id)
            .bind(site_ids)
            .execute(&mut *tx)
            .await?;
        }

        match series_id {
            Some(series_id) => {
                let version =
                    VersionRepo::add_to_series(&mut *tx, series_id, input.kind, item.id).await?;
                if version.is_none() {
                    return Ok(None);
                }
            }
            None => {
                VersionRepo::add_version(&mut *tx, input.kind, item.id, &item.title, input.state)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            content_item_id = item.id,
            kind = input.kind.as_str(),
            series_id = ?series_id,
            "Content item created"
        );
        Ok(Some(item))
    }

    /// Partially update a content item. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no item of `kind` has the given `id`.
    pub async fn update(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
        input: &UpdateContentItem,
        modified_by: Option<DbId>,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items AS c SET \
                title = COALESCE($3, c.title), \
                publish_at = COALESCE($4, c.publish_at), \
                retract_at = COALESCE($5, c.retract_at), \
                \"order\" = COALESCE($6, c.\"order\"), \
                plain_content = COALESCE($7, c.plain_content), \
                rich_content = COALESCE($8, c.rich_content), \
                meta_description = COALESCE($9, c.meta_description), \
                meta_keywords = COALESCE($10, c.meta_keywords), \
                image_path = COALESCE($11, c.image_path), \
                image_name = COALESCE($12, c.image_name), \
                alternative_title = COALESCE($13, c.alternative_title), \
                content_block_parent_id = COALESCE($14, c.content_block_parent_id), \
                modified_by = COALESCE($15, c.modified_by) \
             WHERE c.id = $1 AND c.kind = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(kind.as_str())
            .bind(&input.title)
            .bind(input.publish_at)
            .bind(input.retract_at)
            .bind(input.order)
            .bind(&input.plain_content)
            .bind(&input.rich_content)
            .bind(&input.meta_description)
            .bind(&input.meta_keywords)
            .bind(&input.image_path)
            .bind(&input.image_name)
            .bind(&input.alternative_title)
            .bind(input.content_block_parent_id)
            .bind(modified_by)
            .fetch_optional(pool)
            .await
    }

    /// Replace the rich content of the content block with `slug`.
    ///
    /// Deleted blocks are skipped; when several blocks share the slug the
    /// oldest is edited. Returns `None` if there is no such block.
    pub async fn update_content_block_by_slug(
        pool: &PgPool,
        slug: &str,
        rich_content: &str,
        modified_by: Option<DbId>,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "UPDATE content_items AS c SET rich_content = $2, modified_by = COALESCE($3, c.modified_by) \
             WHERE c.id = ( \
                SELECT id FROM content_items \
                WHERE kind = $4 AND slug = $1 AND state <> $5 \
                ORDER BY id LIMIT 1 \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(slug)
            .bind(rich_content)
            .bind(modified_by)
            .bind(ContentKind::ContentBlock.as_str())
            .bind(ContentState::Deleted.id())
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Direct lookups
    // -----------------------------------------------------------------------

    /// Find an item of `kind` by id, whatever its state.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: ContentKind,
        id: DbId,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM content_items c WHERE c.id = $1 AND c.kind = $2");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find an item of `kind` by slug within the site scope, whatever its state.
    pub async fn for_site_by_slug(
        pool: &PgPool,
        kind: ContentKind,
        slug: &str,
        scope: SiteScope,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items c \
             WHERE c.kind = $1 AND c.slug = $3 AND {} \
             {ORDER_BY} LIMIT 1",
            site_filter("content_item_sites", "content_item_id", "c", 2)
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(kind.as_str())
            .bind(scope.site_id())
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Ids of the sites an item belongs to.
    pub async fn site_ids(pool: &PgPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT site_id FROM content_item_sites WHERE content_item_id = $1 ORDER BY site_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    // -----------------------------------------------------------------------
    // Visibility-filtered reads
    // -----------------------------------------------------------------------

    /// Visitor listing: at most one item per version series.
    ///
    /// Published versions win, then staged ones, then the oldest unpublished
    /// version of a series that has neither.
    pub async fn get_list(
        pool: &PgPool,
        kind: ContentKind,
        scope: SiteScope,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let refs = VersionRepo::list_refs_for_kind(pool, kind).await?;
        let ids = resolve_visible(&refs);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {COLUMNS} FROM content_items c \
             WHERE c.id = ANY($1) AND c.kind = $3 AND c.state <> $4 AND {} \
             {ORDER_BY}",
            site_filter("content_item_sites", "content_item_id", "c", 2)
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(&ids)
            .bind(scope.site_id())
            .bind(kind.as_str())
            .bind(ContentState::Deleted.id())
            .fetch_all(pool)
            .await
    }

    /// Items whose version is in `state` (the site state).
    pub async fn permitted(
        pool: &PgPool,
        kind: ContentKind,
        state: ContentState,
        scope: SiteScope,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items c \
             JOIN versions v ON v.content_type = c.kind AND v.object_id = c.id \
             WHERE c.kind = $1 AND v.state = $3 AND c.state <> $4 AND {} \
             {ORDER_BY}",
            site_filter("content_item_sites", "content_item_id", "c", 2)
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(kind.as_str())
            .bind(scope.site_id())
            .bind(state.id())
            .bind(ContentState::Deleted.id())
            .fetch_all(pool)
            .await
    }

    /// A single permitted item by slug.
    pub async fn permitted_by_slug(
        pool: &PgPool,
        kind: ContentKind,
        slug: &str,
        state: ContentState,
        scope: SiteScope,
    ) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items c \
             JOIN versions v ON v.content_type = c.kind AND v.object_id = c.id \
             WHERE c.kind = $1 AND c.slug = $5 AND v.state = $3 AND c.state <> $4 AND {} \
             {ORDER_BY} LIMIT 1",
            site_filter("content_item_sites", "content_item_id", "c", 2)
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(kind.as_str())
            .bind(scope.site_id())
            .bind(state.id())
            .bind(ContentState::Deleted.id())
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Permitted content blocks belonging to a content block set.
    pub async fn permitted_blocks_of_set(
        pool: &PgPool,
        set_id: DbId,
        state: ContentState,
        scope: SiteScope,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items c \
             JOIN versions v ON v.content_type = c.kind AND v.object_id = c.id \
             WHERE c.kind = $1 AND c.content_block_parent_id = $5 \
               AND v.state = $3 AND c.state <> $4 AND {} \
             {ORDER_BY}",
            site_filter("content_item_sites", "content_item_id", "c", 2)
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(ContentKind::ContentBlock.as_str())
            .bind(scope.site_id())
            .bind(state.id())
            .bind(ContentState::Deleted.id())
            .bind(set_id)
            .fetch_all(pool)
            .await
    }

    /// Editor console listing: every versioned, non-deleted item of `kind`.
    pub async fn console(
        pool: &PgPool,
        kind: ContentKind,
        scope: SiteScope,
    ) -> Result<Vec<ContentItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_items c \
             JOIN versions v ON v.content_type = c.kind AND v.object_id = c.id \
             WHERE c.kind = $1 AND v.state <> $3 AND c.state <> $3 AND {} \
             {ORDER_BY}",
            site_filter("content_item_sites", "content_item_id", "c", 2)
        );
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(kind.as_str())
            .bind(scope.site_id())
            .bind(ContentState::Deleted.id())
            .fetch_all(pool)
            .await
    }
}

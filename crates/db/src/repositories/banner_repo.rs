//! Repository for `banners`, `banner_sets`, and their membership.

use sqlx::PgPool;
use tunobase_core::site::SiteScope;
use tunobase_core::state::ContentState;
use tunobase_core::types::DbId;

use crate::models::banner::{Banner, BannerSet, BannerSetWithBanners, CreateBanner, CreateBannerSet};
use crate::repositories::site_filter;

const BANNER_COLUMNS: &str = "b.id, b.kind, b.title, b.state, b.publish_at, b.retract_at, \
    b.\"order\", b.image_path, b.image_name, b.plain_content, b.rich_content, \
    b.created_at, b.updated_at";

const SET_COLUMNS: &str = "bs.id, bs.kind, bs.slug, bs.state, bs.publish_at, bs.retract_at, \
    bs.\"order\", bs.created_at, bs.updated_at";

pub struct BannerRepo;

impl BannerRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    pub async fn create_banner(
        pool: &PgPool,
        input: &CreateBanner,
        site_ids: &[DbId],
    ) -> Result<Banner, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO banners AS b \
                (kind, title, state, publish_at, \"order\", image_path, image_name, \
                 plain_content, rich_content) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {BANNER_COLUMNS}"
        );
        let banner = sqlx::query_as::<_, Banner>(&query)
            .bind(input.kind.as_str())
            .bind(&input.title)
            .bind(input.state.unwrap_or(ContentState::Published).id())
            .bind(input.publish_at)
            .bind(input.order.unwrap_or(0))
            .bind(&input.image_path)
            .bind(&input.image_name)
            .bind(&input.plain_content)
            .bind(&input.rich_content)
            .fetch_one(&mut *tx)
            .await?;

        if !site_ids.is_empty() {
            sqlx::query(
                "INSERT INTO banner_sites (banner_id, site_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT ON CONSTRAINT uq_banner_sites DO NOTHING",
            )
            .bind(banner.id)
            .bind(site_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(banner)
    }

    pub async fn create_set(
        pool: &PgPool,
        input: &CreateBannerSet,
        site_ids: &[DbId],
    ) -> Result<BannerSet, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO banner_sets AS bs (kind, slug, state, publish_at, \"order\") \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SET_COLUMNS}"
        );
        let set = sqlx::query_as::<_, BannerSet>(&query)
            .bind(input.kind.as_str())
            .bind(&input.slug)
            .bind(input.state.unwrap_or(ContentState::Published).id())
            .bind(input.publish_at)
            .bind(input.order.unwrap_or(0))
            .fetch_one(&mut *tx)
            .await?;

        if !site_ids.is_empty() {
            sqlx::query(
                "INSERT INTO banner_set_sites (banner_set_id, site_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT ON CONSTRAINT uq_banner_set_sites DO NOTHING",
            )
            .bind(set.id)
            .bind(site_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(set)
    }

    /// Add a banner to a set. Returns `false` when the kinds differ or
    /// either row is missing.
    pub async fn add_to_set(
        pool: &PgPool,
        banner_set_id: DbId,
        banner_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO banner_set_members (banner_set_id, banner_id) \
             SELECT bs.id, b.id FROM banner_sets bs JOIN banners b ON b.kind = bs.kind \
             WHERE bs.id = $1 AND b.id = $2 \
             ON CONFLICT ON CONSTRAINT uq_banner_set_members DO NOTHING",
        )
        .bind(banner_set_id)
        .bind(banner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Visibility-filtered reads
    // -----------------------------------------------------------------------

    /// A permitted banner set by slug, with its permitted banners in display order.
    pub async fn permitted_set_by_slug(
        pool: &PgPool,
        slug: &str,
        state: ContentState,
        scope: SiteScope,
    ) -> Result<Option<BannerSetWithBanners>, sqlx::Error> {
        let query = format!(
            "SELECT {SET_COLUMNS} FROM banner_sets bs \
             WHERE bs.slug = $1 AND bs.state = $3 AND bs.state <> $4 AND {} \
             ORDER BY bs.\"order\" ASC, bs.id ASC LIMIT 1",
            site_filter("banner_set_sites", "banner_set_id", "bs", 2)
        );
        let Some(set) = sqlx::query_as::<_, BannerSet>(&query)
            .bind(slug)
            .bind(scope.site_id())
            .bind(state.id())
            .bind(ContentState::Deleted.id())
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let banners = Self::permitted_banners_of_set(pool, set.id, state, scope).await?;
        Ok(Some(BannerSetWithBanners { set, banners }))
    }

    /// Permitted banners that belong to a set, in display order.
    pub async fn permitted_banners_of_set(
        pool: &PgPool,
        banner_set_id: DbId,
        state: ContentState,
        scope: SiteScope,
    ) -> Result<Vec<Banner>, sqlx::Error> {
        let query = format!(
            "SELECT {BANNER_COLUMNS} FROM banners b \
             JOIN banner_set_members m ON m.banner_id = b.id \
             WHERE m.banner_set_id = $1 AND b.state = $3 AND b.state <> $4 AND {} \
             ORDER BY b.\"order\" ASC, b.publish_at DESC NULLS LAST, b.id ASC",
            site_filter("banner_sites", "banner_id", "b", 2)
        );
        sqlx::query_as::<_, Banner>(&query)
            .bind(banner_set_id)
            .bind(scope.site_id())
            .bind(state.id())
            .bind(ContentState::Deleted.id())
            .fetch_all(pool)
            .await
    }
}

//! Repository for `gallery_images` and their links to galleries.

use sqlx::PgPool;
use tunobase_core::site::SiteScope;
use tunobase_core::state::ContentState;
use tunobase_core::types::DbId;

use crate::models::gallery::{CreateGalleryImage, GalleryImage};
use crate::repositories::site_filter;

const COLUMNS: &str = "g.id, g.image_path, g.image_name, g.state, g.publish_at, g.retract_at, \
    g.\"order\", g.created_at, g.updated_at";

pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a gallery image, attach it to `site_ids`, and link it to `gallery_id`.
    pub async fn create_image(
        pool: &PgPool,
        gallery_id: DbId,
        input: &CreateGalleryImage,
        site_ids: &[DbId],
    ) -> Result<GalleryImage, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO gallery_images AS g (image_path, image_name, state, publish_at, \"order\") \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let image = sqlx::query_as::<_, GalleryImage>(&query)
            .bind(&input.image_path)
            .bind(&input.image_name)
            .bind(input.state.unwrap_or(ContentState::Published).id())
            .bind(input.publish_at)
            .bind(input.order.unwrap_or(0))
            .fetch_one(&mut *tx)
            .await?;

        if !site_ids.is_empty() {
            sqlx::query(
                "INSERT INTO gallery_image_sites (gallery_image_id, site_id) \
                 SELECT $1, UNNEST($2::BIGINT[]) \
                 ON CONFLICT ON CONSTRAINT uq_gallery_image_sites DO NOTHING",
            )
            .bind(image.id)
            .bind(site_ids)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO gallery_image_links (gallery_id, gallery_image_id) VALUES ($1, $2)",
        )
        .bind(gallery_id)
        .bind(image.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Permitted images of a gallery, in display order.
    pub async fn permitted_images(
        pool: &PgPool,
        gallery_id: DbId,
        state: ContentState,
        scope: SiteScope,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gallery_images g \
             JOIN gallery_image_links l ON l.gallery_image_id = g.id \
             WHERE l.gallery_id = $1 AND g.state = $3 AND g.state <> $4 AND {} \
             ORDER BY g.\"order\" ASC, g.publish_at DESC NULLS LAST, g.id ASC",
            site_filter("gallery_image_sites", "gallery_image_id", "g", 2)
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(gallery_id)
            .bind(scope.site_id())
            .bind(state.id())
            .bind(ContentState::Deleted.id())
            .fetch_all(pool)
            .await
    }
}

//! Repository for the `default_images` table.

use rand::seq::IndexedRandom;
use sqlx::PgPool;
use tunobase_core::state::ContentState;

use crate::models::default_image::{CreateDefaultImage, DefaultImage};

const COLUMNS: &str = "id, category, image_path, state, publish_at, retract_at, created_at, updated_at";

pub struct DefaultImageRepo;

impl DefaultImageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDefaultImage,
    ) -> Result<DefaultImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO default_images (category, image_path, state) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DefaultImage>(&query)
            .bind(&input.category)
            .bind(&input.image_path)
            .bind(input.state.unwrap_or(ContentState::Published).id())
            .fetch_one(pool)
            .await
    }

    /// Image paths of the permitted default images in `category`.
    pub async fn permitted_paths(
        pool: &PgPool,
        category: &str,
        state: ContentState,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT image_path FROM default_images \
             WHERE category = $1 AND state = $2 AND state <> $3 \
             ORDER BY id",
        )
        .bind(category)
        .bind(state.id())
        .bind(ContentState::Deleted.id())
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(path,)| path).collect())
    }

    /// A random permitted image path of `category`, `None` if there is none.
    pub async fn get_random(
        pool: &PgPool,
        category: &str,
        state: ContentState,
    ) -> Result<Option<String>, sqlx::Error> {
        let paths = Self::permitted_paths(pool, category, state).await?;
        Ok(paths.choose(&mut rand::rng()).cloned())
    }
}

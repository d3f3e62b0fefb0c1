//! Repository for the `sites` table.

use sqlx::PgPool;

use crate::models::site::{CreateSite, Site};

const COLUMNS: &str = "id, domain, name, created_at, updated_at";

/// Site registry lookups.
pub struct SiteRepo;

impl SiteRepo {
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (domain, name) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(&input.domain)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_domain(pool: &PgPool, domain: &str) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE domain = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(domain)
            .fetch_optional(pool)
            .await
    }

    /// Return the site registered for `domain`, creating it if missing.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict, so concurrent start-ups agree on one site.
    pub async fn get_or_create(pool: &PgPool, domain: &str) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (domain, name) VALUES ($1, $1) \
             ON CONFLICT ON CONSTRAINT uq_sites_domain DO UPDATE SET domain = EXCLUDED.domain \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(domain)
            .fetch_one(pool)
            .await
    }
}

//! Repository for the `users` table. Users are provisioned out of band;
//! the service only reads them (tests insert them directly).

use sqlx::PgPool;
use tunobase_core::types::DbId;

use crate::models::user::User;

const COLUMNS: &str = "id, email, display_name, role, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user. Used by provisioning scripts and tests.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        display_name: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, display_name, role) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(display_name)
            .bind(role)
            .fetch_one(pool)
            .await
    }
}

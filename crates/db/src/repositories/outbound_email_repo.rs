//! Repository for the `outbound_emails` table.

use sqlx::PgPool;
use tunobase_core::mail::join_addresses;
use tunobase_core::site::SiteScope;

use crate::models::outbound_email::{CreateOutboundEmail, OutboundEmail};

const COLUMNS: &str = "id, user_id, to_addresses, bcc_addresses, subject, message, \
    sent_timestamp, site_id, created_at, updated_at";

pub struct OutboundEmailRepo;

impl OutboundEmailRepo {
    /// Record one sent message.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOutboundEmail,
    ) -> Result<OutboundEmail, sqlx::Error> {
        let query = format!(
            "INSERT INTO outbound_emails (user_id, to_addresses, bcc_addresses, subject, message, site_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OutboundEmail>(&query)
            .bind(input.user_id)
            .bind(join_addresses(&input.to_addresses))
            .bind(join_addresses(input.bcc_addresses.as_deref().unwrap_or_default()))
            .bind(&input.subject)
            .bind(&input.message)
            .bind(input.site_id)
            .fetch_one(pool)
            .await
    }

    /// Record a batch of sent messages in one transaction. Returns the
    /// number of rows written.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateOutboundEmail],
    ) -> Result<u64, sqlx::Error> {
        if inputs.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;
        let mut written = 0;
        for input in inputs {
            let result = sqlx::query(
                "INSERT INTO outbound_emails \
                    (user_id, to_addresses, bcc_addresses, subject, message, site_id) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(input.user_id)
            .bind(join_addresses(&input.to_addresses))
            .bind(join_addresses(input.bcc_addresses.as_deref().unwrap_or_default()))
            .bind(&input.subject)
            .bind(&input.message)
            .bind(input.site_id)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }
        tx.commit().await?;
        Ok(written)
    }

    /// One page of tracking rows, newest first.
    pub async fn list(
        pool: &PgPool,
        scope: SiteScope,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OutboundEmail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM outbound_emails \
             WHERE ($1::BIGINT IS NULL OR site_id = $1) \
             ORDER BY sent_timestamp DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, OutboundEmail>(&query)
            .bind(scope.site_id())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, scope: SiteScope) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM outbound_emails WHERE ($1::BIGINT IS NULL OR site_id = $1)",
        )
        .bind(scope.site_id())
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}

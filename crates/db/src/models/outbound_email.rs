//! Outbound email tracking model and DTO.

use serde::Serialize;
use sqlx::FromRow;
use tunobase_core::types::{DbId, Timestamp};

/// A row from the `outbound_emails` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutboundEmail {
    pub id: DbId,
    pub user_id: Option<DbId>,
    /// Newline-separated recipient list.
    pub to_addresses: String,
    /// Newline-separated BCC list, empty when there were none.
    pub bcc_addresses: String,
    pub subject: String,
    pub message: String,
    pub sent_timestamp: Timestamp,
    pub site_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values for a tracking row.
#[derive(Debug, Clone)]
pub struct CreateOutboundEmail {
    pub user_id: Option<DbId>,
    pub to_addresses: Vec<String>,
    pub bcc_addresses: Option<Vec<String>>,
    pub subject: String,
    pub message: String,
    pub site_id: DbId,
}

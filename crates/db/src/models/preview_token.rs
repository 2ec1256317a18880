//! Preview token entity model.

use hasta_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `preview_tokens` table.
///
/// A bearer capability: the token string is the lookup key and the only
/// access check. Expiry is the sole invalidation mechanism; expired rows
/// are garbage-collected by the sweeper.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PreviewToken {
    pub id: DbId,
    pub page_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

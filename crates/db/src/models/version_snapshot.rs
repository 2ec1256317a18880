//! Version snapshot entity model.
//!
//! Snapshots are append-only: created as a side effect of publishing a
//! block, never mutated afterwards.

use hasta_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// A row from the `version_snapshots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionSnapshot {
    pub id: DbId,
    pub block_id: DbId,
    pub version_number: i32,
    pub content: JsonValue,
    pub created_at: Timestamp,
}

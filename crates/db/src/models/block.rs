//! Block entity model and DTOs.

use hasta_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// A row from the `blocks` table.
///
/// `content_draft` always holds the editable content; `content_published`
/// stays `NULL` until the first publish and afterwards lags the draft until
/// the next one. Only a publish synchronizes the two.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Block {
    pub id: DbId,
    pub page_id: DbId,
    pub block_key: String,
    pub block_type: String,
    pub content_draft: JsonValue,
    pub content_published: Option<JsonValue>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new block.
///
/// `block_type` must match the `type` tag inside `content_draft`; the API
/// layer derives it from the typed content, so the two cannot disagree for
/// requests that come through the boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlock {
    pub page_id: DbId,
    pub block_key: String,
    pub block_type: String,
    pub content_draft: JsonValue,
}

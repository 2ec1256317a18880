//! Page entity model and DTOs.

use hasta_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new page.
///
/// If `status` is `None`, the page starts as a draft.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub slug: String,
    pub title: String,
    pub status: Option<String>,
}

/// DTO for updating a page. All fields optional.
///
/// The slug is intentionally immutable: it is the public lookup key and
/// changing it would orphan published URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub status: Option<String>,
}

//! Regional SEO page entity model and seed DTO.

use hasta_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `seo_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeoPage {
    pub id: DbId,
    pub region_key: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub heading: Option<String>,
    pub intro_html: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One entry of the regional metadata seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeoPageSeed {
    pub region_key: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub heading: Option<String>,
    pub intro_html: Option<String>,
}

/// Outcome of an idempotent upsert-by-key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

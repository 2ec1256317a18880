//! Repository for the `seo_pages` table.
//!
//! Written only by the seeder's batch upsert; the interactive CMS never
//! touches these rows, so the two surfaces cannot write conflicting shapes.

use sqlx::PgPool;

use crate::models::seo_page::{SeoPage, SeoPageSeed, UpsertOutcome};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, region_key, title, meta_description, heading, intro_html, created_at, updated_at";

/// Provides upsert-by-key operations for regional SEO pages.
pub struct SeoPageRepo;

impl SeoPageRepo {
    /// Find a row by its region key.
    pub async fn find_by_key(pool: &PgPool, region_key: &str) -> Result<Option<SeoPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seo_pages WHERE region_key = $1");
        sqlx::query_as::<_, SeoPage>(&query)
            .bind(region_key)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new row from a seed entry.
    pub async fn create(pool: &PgPool, seed: &SeoPageSeed) -> Result<SeoPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO seo_pages (region_key, title, meta_description, heading, intro_html)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeoPage>(&query)
            .bind(&seed.region_key)
            .bind(&seed.title)
            .bind(&seed.meta_description)
            .bind(&seed.heading)
            .bind(&seed.intro_html)
            .fetch_one(pool)
            .await
    }

    /// Overwrite an existing row identified by its region key.
    ///
    /// Returns `None` if no row with that key exists.
    pub async fn update_by_key(
        pool: &PgPool,
        seed: &SeoPageSeed,
    ) -> Result<Option<SeoPage>, sqlx::Error> {
        let query = format!(
            "UPDATE seo_pages SET
                title = $2,
                meta_description = $3,
                heading = $4,
                intro_html = $5,
                updated_at = NOW()
             WHERE region_key = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SeoPage>(&query)
            .bind(&seed.region_key)
            .bind(&seed.title)
            .bind(&seed.meta_description)
            .bind(&seed.heading)
            .bind(&seed.intro_html)
            .fetch_optional(pool)
            .await
    }

    /// Idempotent upsert-by-key: update the row if the key exists,
    /// insert it otherwise, reporting which happened.
    ///
    /// The seeder is a single-writer batch tool; two seeders racing on the
    /// same fresh key would surface as a unique violation, which the caller
    /// counts as an error rather than retrying.
    pub async fn upsert(pool: &PgPool, seed: &SeoPageSeed) -> Result<UpsertOutcome, sqlx::Error> {
        if Self::update_by_key(pool, seed).await?.is_some() {
            return Ok(UpsertOutcome::Updated);
        }
        Self::create(pool, seed).await?;
        Ok(UpsertOutcome::Created)
    }

    /// List all rows, ordered by region key.
    pub async fn list(pool: &PgPool) -> Result<Vec<SeoPage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM seo_pages ORDER BY region_key ASC");
        sqlx::query_as::<_, SeoPage>(&query).fetch_all(pool).await
    }
}

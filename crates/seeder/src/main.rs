//! Batch seeder for regional SEO metadata.
//!
//! Reads a JSON array of regional entries and upserts each one into the
//! `seo_pages` table by `region_key`, reporting created/updated/error
//! counts. Re-running with the same file is a no-op apart from refreshed
//! `updated_at` timestamps. A malformed or failing entry is counted and
//! logged, never fatal to the rest of the batch.
//!
//! Usage: `hasta-seeder <seed.json>` (or set `SEED_FILE`).

use anyhow::Context;
use hasta_db::models::seo_page::{SeoPageSeed, UpsertOutcome};
use hasta_db::repositories::SeoPageRepo;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hasta_seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seed_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SEED_FILE").ok())
        .context("Usage: hasta-seeder <seed.json> (or set SEED_FILE)")?;

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = hasta_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    hasta_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let raw = tokio::fs::read_to_string(&seed_path)
        .await
        .with_context(|| format!("Failed to read seed file {seed_path}"))?;
    let entries: Vec<SeoPageSeed> =
        serde_json::from_str(&raw).context("Seed file is not a JSON array of regional entries")?;

    tracing::info!(file = %seed_path, entries = entries.len(), "Seeding regional SEO pages");

    let mut created = 0u32;
    let mut updated = 0u32;
    let mut errors = 0u32;

    for entry in &entries {
        match SeoPageRepo::upsert(&pool, entry).await {
            Ok(UpsertOutcome::Created) => created += 1,
            Ok(UpsertOutcome::Updated) => updated += 1,
            Err(e) => {
                errors += 1;
                tracing::error!(region_key = %entry.region_key, error = %e, "Upsert failed");
            }
        }
    }

    tracing::info!(created, updated, errors, "Seed run complete");

    if errors > 0 {
        anyhow::bail!("{errors} of {} entries failed", entries.len());
    }
    Ok(())
}

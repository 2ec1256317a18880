//! Periodic garbage collection of expired preview tokens.
//!
//! Expiration is the only invalidation mechanism for preview tokens, so
//! expired rows accumulate until something removes them. This task deletes
//! them on a fixed interval using `tokio::time::interval`. The delete
//! predicate only matches rows already past their expiry, so the sweep is
//! safe to run concurrently with token issuance and with the on-demand
//! cleanup endpoint.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use hasta_db::repositories::PreviewTokenRepo;

/// How often the sweep runs unless overridden: 15 minutes.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 900;

/// Run the preview-token sweep loop until `cancel` is triggered.
///
/// The cadence is read from `PREVIEW_SWEEP_INTERVAL_SECS` (seconds).
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("PREVIEW_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Preview token sweeper started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Preview token sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match PreviewTokenRepo::delete_expired(&pool).await {
                    Ok(removed) => {
                        if removed > 0 {
                            tracing::info!(removed, "Preview token sweep: purged expired tokens");
                        } else {
                            tracing::debug!("Preview token sweep: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Preview token sweep failed");
                    }
                }
            }
        }
    }
}

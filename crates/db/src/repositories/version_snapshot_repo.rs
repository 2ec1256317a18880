//! Repository for the `version_snapshots` table.
//!
//! Snapshots are written only by [`BlockRepo::publish`]; this repository
//! is read-only by design.
//!
//! [`BlockRepo::publish`]: crate::repositories::BlockRepo::publish

use hasta_core::types::DbId;
use sqlx::PgPool;

use crate::models::version_snapshot::VersionSnapshot;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, block_id, version_number, content, created_at";

/// Read access to a block's published history.
pub struct VersionSnapshotRepo;

impl VersionSnapshotRepo {
    /// List all snapshots for a block, newest first.
    ///
    /// Empty if the block has never been published.
    pub async fn list_by_block(
        pool: &PgPool,
        block_id: DbId,
    ) -> Result<Vec<VersionSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM version_snapshots
             WHERE block_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(block_id)
            .fetch_all(pool)
            .await
    }

    /// Find a snapshot by ID, scoped to the owning block.
    ///
    /// Returns `None` when the snapshot does not exist *or* belongs to a
    /// different block, so a revert can never cross block boundaries.
    pub async fn find_for_block(
        pool: &PgPool,
        block_id: DbId,
        version_id: DbId,
    ) -> Result<Option<VersionSnapshot>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM version_snapshots WHERE id = $2 AND block_id = $1");
        sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(block_id)
            .bind(version_id)
            .fetch_optional(pool)
            .await
    }
}

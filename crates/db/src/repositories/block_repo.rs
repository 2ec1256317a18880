//! Repository for the `blocks` table.

use hasta_core::types::DbId;
use serde_json::Value as JsonValue;
use sqlx::PgPool;

use crate::models::block::{Block, CreateBlock};
use crate::models::version_snapshot::VersionSnapshot;
use crate::repositories::version_snapshot_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_id, block_key, block_type, content_draft, \
    content_published, display_order, created_at, updated_at";

/// Provides CRUD, draft-mutation, publish, and reorder operations for blocks.
pub struct BlockRepo;

impl BlockRepo {
    // ── Standard CRUD ────────────────────────────────────────────────

    /// Insert a new block at the end of its page's display order.
    pub async fn create(pool: &PgPool, input: &CreateBlock) -> Result<Block, sqlx::Error> {
        let query = format!(
            "INSERT INTO blocks (page_id, block_key, block_type, content_draft, display_order)
             VALUES (
                $1, $2, $3, $4,
                (SELECT COALESCE(MAX(display_order), -1) + 1 FROM blocks WHERE page_id = $1)
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(input.page_id)
            .bind(&input.block_key)
            .bind(&input.block_type)
            .bind(&input.content_draft)
            .fetch_one(pool)
            .await
    }

    /// Find a block by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Block>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blocks WHERE id = $1");
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all blocks of a page, ordered by display order ascending.
    pub async fn list_by_page(pool: &PgPool, page_id: DbId) -> Result<Vec<Block>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blocks
             WHERE page_id = $1
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a block by ID. Its snapshots cascade. Returns `true` if a
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blocks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ── Draft / publish ──────────────────────────────────────────────

    /// Overwrite a block's draft content.
    ///
    /// Last write wins: two editors on the same block silently overwrite
    /// each other's drafts. `content_published` is never touched here.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_draft(
        pool: &PgPool,
        id: DbId,
        content: &JsonValue,
    ) -> Result<Option<Block>, sqlx::Error> {
        let query = format!(
            "UPDATE blocks SET content_draft = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(pool)
            .await
    }

    /// Publish a block: copy `content_draft` into `content_published` and
    /// append a version snapshot, in one transaction.
    ///
    /// The UPDATE runs first and takes the block's row lock, so concurrent
    /// publishes of the same block serialize and version numbers stay
    /// gapless; the unique index on (block_id, version_number) is the
    /// backstop. Returns `None` if the block does not exist.
    pub async fn publish(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(Block, VersionSnapshot)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE blocks SET content_published = content_draft, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let block = sqlx::query_as::<_, Block>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(block) = block else {
            return Ok(None);
        };

        let query = format!(
            "INSERT INTO version_snapshots (block_id, version_number, content)
             VALUES (
                $1,
                (SELECT COALESCE(MAX(version_number), 0) + 1
                   FROM version_snapshots WHERE block_id = $1),
                $2
             )
             RETURNING {cols}",
            cols = version_snapshot_repo::COLUMNS
        );
        let snapshot = sqlx::query_as::<_, VersionSnapshot>(&query)
            .bind(id)
            .bind(&block.content_draft)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((block, snapshot)))
    }

    /// Stage a past snapshot's content as the block's new draft.
    ///
    /// The block's published content stays live until an explicit publish;
    /// staging reuses the draft-update path so "content becomes live" has a
    /// single code path.
    pub async fn stage_draft(
        pool: &PgPool,
        id: DbId,
        content: &JsonValue,
    ) -> Result<Option<Block>, sqlx::Error> {
        Self::update_draft(pool, id, content).await
    }

    // ── Reorder ──────────────────────────────────────────────────────

    /// Move `active_id` to `over_id`'s prior position within the page,
    /// shifting the blocks in between by one, and rewrite display orders
    /// contiguously.
    ///
    /// Returns `false` (touching nothing) when either ID is not part of
    /// the page's block set — drag gestures can reference a stale list,
    /// so this is a no-op rather than an error.
    pub async fn reorder(
        pool: &PgPool,
        page_id: DbId,
        active_id: DbId,
        over_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the page's blocks so a concurrent reorder cannot interleave.
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM blocks WHERE page_id = $1 \
             ORDER BY display_order ASC, id ASC \
             FOR UPDATE",
        )
        .bind(page_id)
        .fetch_all(&mut *tx)
        .await?;

        let mut ids: Vec<DbId> = rows.into_iter().map(|r| r.0).collect();
        let (Some(from), Some(to)) = (
            ids.iter().position(|&id| id == active_id),
            ids.iter().position(|&id| id == over_id),
        ) else {
            return Ok(false);
        };

        let moved = ids.remove(from);
        ids.insert(to, moved);

        for (order, block_id) in ids.iter().enumerate() {
            sqlx::query(
                "UPDATE blocks SET display_order = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(block_id)
            .bind(order as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }
}

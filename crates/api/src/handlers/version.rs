//! Handlers for a block's version history.
//!
//! History is append-only and written solely by the publish path; these
//! handlers expose it and stage past snapshots back into the draft. A
//! revert never touches published content — the block stays at its current
//! live state until an explicit publish afterwards, so "content becomes
//! live" has exactly one code path.

use axum::extract::{Path, State};
use axum::Json;

use hasta_core::error::CoreError;
use hasta_core::types::DbId;
use hasta_db::models::block::Block;
use hasta_db::models::version_snapshot::VersionSnapshot;
use hasta_db::repositories::{BlockRepo, VersionSnapshotRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/blocks/{id}/versions
///
/// All snapshots for the block, newest first. Empty if the block has never
/// been published.
pub async fn list_by_block(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<VersionSnapshot>>> {
    BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;

    let versions = VersionSnapshotRepo::list_by_block(&state.pool, id).await?;
    Ok(Json(versions))
}

/// POST /api/v1/blocks/{id}/versions/{version_id}/revert
///
/// Stages the snapshot's content as the block's new draft and returns the
/// updated block. 404 when the snapshot does not exist or belongs to a
/// different block.
pub async fn revert(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Block>> {
    BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;

    let snapshot = VersionSnapshotRepo::find_for_block(&state.pool, id, version_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VersionSnapshot",
            id: version_id,
        }))?;

    let block = BlockRepo::stage_draft(&state.pool, id, &snapshot.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;
    Ok(Json(block))
}

//! Handlers for the `/blocks` resource and block operations nested under
//! pages (creation, reorder).
//!
//! Draft updates are structural-typed but not content-validated: the
//! payload must deserialize into the block's declared content variant, but
//! advisory field rules only run through the explicit validate endpoint.
//! The caller decides whether validation errors block publishing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use hasta_core::content::{BlockContent, BlockType, FieldError};
use hasta_core::error::CoreError;
use hasta_core::slug;
use hasta_core::types::DbId;
use hasta_db::models::block::{Block, CreateBlock};
use hasta_db::models::version_snapshot::VersionSnapshot;
use hasta_db::repositories::{BlockRepo, PageRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for creating a block. The block type is derived from the
/// content's `type` tag, so the column and payload cannot disagree.
#[derive(Debug, Deserialize)]
pub struct CreateBlockRequest {
    pub block_key: String,
    pub content: BlockContent,
}

/// Request body for reordering a page's blocks after a drag gesture.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub active_block_id: DbId,
    pub over_block_id: DbId,
}

/// Result of an advisory content validation.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// POST /api/v1/pages/{page_id}/blocks
pub async fn create(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreateBlockRequest>,
) -> AppResult<(StatusCode, Json<Block>)> {
    slug::validate_block_key(&input.block_key)?;

    PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let content_draft = serde_json::to_value(&input.content)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let block = BlockRepo::create(
        &state.pool,
        &CreateBlock {
            page_id,
            block_key: input.block_key,
            block_type: input.content.block_type().as_str().to_string(),
            content_draft,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/v1/pages/{page_id}/blocks
pub async fn list_by_page(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<Block>>> {
    PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let blocks = BlockRepo::list_by_page(&state.pool, page_id).await?;
    Ok(Json(blocks))
}

/// GET /api/v1/blocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Block>> {
    let block = BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;
    Ok(Json(block))
}

/// PUT /api/v1/blocks/{id}/draft
///
/// Overwrites the draft. Last write wins — concurrent editors on the same
/// block are not detected. Published content is never touched here.
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(content): Json<BlockContent>,
) -> AppResult<Json<Block>> {
    let block = BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;

    check_content_type(&block, &content)?;

    let value =
        serde_json::to_value(&content).map_err(|e| AppError::InternalError(e.to_string()))?;
    let block = BlockRepo::update_draft(&state.pool, id, &value)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;
    Ok(Json(block))
}

/// POST /api/v1/blocks/{id}/validate
///
/// Advisory validation of a content payload against the block's type and
/// per-type field rules. Always 200; the report carries the findings.
pub async fn validate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(content): Json<BlockContent>,
) -> AppResult<Json<ValidationReport>> {
    let block = BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;

    let mut errors = content.validate();
    let declared = BlockType::parse(&block.block_type)?;
    if content.block_type() != declared {
        errors.insert(
            0,
            FieldError {
                field: "type".to_string(),
                message: format!(
                    "Content type '{}' does not match block type '{declared}'",
                    content.block_type()
                ),
            },
        );
    }

    Ok(Json(ValidationReport {
        valid: errors.is_empty(),
        errors,
    }))
}

/// POST /api/v1/blocks/{id}/publish
///
/// Copies the draft into published content and appends a version snapshot,
/// atomically per block. Returns the new snapshot.
pub async fn publish(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<VersionSnapshot>)> {
    let (_, snapshot) = BlockRepo::publish(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Block", id }))?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// PUT /api/v1/pages/{page_id}/blocks/reorder
///
/// Stale drag gestures referencing blocks no longer on the page are a
/// silent no-op, not an error, so the response is 204 either way.
pub async fn reorder(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    BlockRepo::reorder(
        &state.pool,
        page_id,
        input.active_block_id,
        input.over_block_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/blocks/{id}
///
/// Version snapshots cascade with the block.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BlockRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Block", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Reject a payload whose content variant does not match the block's
/// declared type: retyping a block goes through delete + create, never
/// through a draft write.
fn check_content_type(block: &Block, content: &BlockContent) -> Result<(), AppError> {
    let declared = BlockType::parse(&block.block_type)?;
    if content.block_type() != declared {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Content type '{}' does not match block type '{declared}'",
            content.block_type()
        ))));
    }
    Ok(())
}

//! Handlers for preview tokens and the token-gated draft view.
//!
//! Pure bearer model: a valid, non-expired token is the only access check,
//! with no binding to the requester. Missing and expired tokens collapse
//! into one indistinguishable outcome so the surface never leaks whether a
//! token ever existed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use hasta_core::error::CoreError;
use hasta_core::preview;
use hasta_core::types::DbId;
use hasta_db::models::preview_token::PreviewToken;
use hasta_db::repositories::{BlockRepo, PageRepo, PreviewTokenRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::page::PageWithBlocks;
use crate::state::AppState;

/// Request body for issuing a preview token.
#[derive(Debug, Deserialize)]
pub struct CreatePreviewTokenRequest {
    /// Minutes until expiry; defaults to one hour. Zero is legal and
    /// produces a token that is expired on arrival.
    #[serde(default)]
    pub expires_in_minutes: Option<i64>,
}

/// Response body for the expired-token cleanup.
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub removed: u64,
}

/// POST /api/v1/pages/{page_id}/preview-tokens
pub async fn create_token(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
    Json(input): Json<CreatePreviewTokenRequest>,
) -> AppResult<(StatusCode, Json<PreviewToken>)> {
    let minutes = input
        .expires_in_minutes
        .unwrap_or(preview::DEFAULT_EXPIRES_IN_MINUTES);
    preview::validate_expiry_minutes(minutes)?;

    PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let token = preview::generate_preview_token();
    let record = PreviewTokenRepo::create(&state.pool, page_id, &token, minutes).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/pages/{page_id}/preview-tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<Json<Vec<PreviewToken>>> {
    PageRepo::find_by_id(&state.pool, page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: page_id,
        }))?;

    let tokens = PreviewTokenRepo::list_by_page(&state.pool, page_id).await?;
    Ok(Json(tokens))
}

/// GET /api/v1/preview/{token}
///
/// The draft view of the token's page. Valid repeatedly until expiry.
pub async fn preview_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<PageWithBlocks>> {
    let token = PreviewTokenRepo::find_valid(&state.pool, &token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired preview token".to_string(),
            ))
        })?;

    let page = PageRepo::find_by_id(&state.pool, token.page_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Page",
            id: token.page_id,
        }))?;
    let blocks = BlockRepo::list_by_page(&state.pool, token.page_id).await?;
    Ok(Json(PageWithBlocks { page, blocks }))
}

/// DELETE /api/v1/preview-tokens/expired
///
/// On-demand counterpart of the background sweeper. Idempotent; never
/// removes a token whose expiry is still in the future.
pub async fn cleanup_expired(State(state): State<AppState>) -> AppResult<Json<CleanupResponse>> {
    let removed = PreviewTokenRepo::delete_expired(&state.pool).await?;
    Ok(Json(CleanupResponse { removed }))
}

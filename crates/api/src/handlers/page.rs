//! Handlers for the `/pages` resource.
//!
//! The editor load path is slug-keyed (`/pages/by-slug/{slug}`) and returns
//! the page together with its blocks in display order, drafts included.
//! Everything else addresses pages by numeric id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use hasta_core::error::CoreError;
use hasta_core::types::DbId;
use hasta_core::{page as page_rules, slug};
use hasta_db::models::block::Block;
use hasta_db::models::page::{CreatePage, Page, UpdatePage};
use hasta_db::repositories::{BlockRepo, PageRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A page together with its blocks, ordered by display order ascending.
#[derive(Debug, Serialize)]
pub struct PageWithBlocks {
    pub page: Page,
    pub blocks: Vec<Block>,
}

/// GET /api/v1/pages
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Page>>> {
    let pages = PageRepo::list(&state.pool).await?;
    Ok(Json(pages))
}

/// POST /api/v1/pages
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<(StatusCode, Json<Page>)> {
    slug::validate_slug(&input.slug)?;
    if let Some(status) = &input.status {
        page_rules::validate_status(status)?;
    }

    let page = PageRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// GET /api/v1/pages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Page>> {
    let page = PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// GET /api/v1/pages/by-slug/{slug}
///
/// Editor load path: the page regardless of status, plus all of its blocks
/// with draft and published content.
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PageWithBlocks>> {
    let page = PageRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No page for slug '{slug}'")))?;
    let blocks = BlockRepo::list_by_page(&state.pool, page.id).await?;
    Ok(Json(PageWithBlocks { page, blocks }))
}

/// PUT /api/v1/pages/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePage>,
) -> AppResult<Json<Page>> {
    if let Some(status) = &input.status {
        page_rules::validate_status(status)?;
    }

    let page = PageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;
    Ok(Json(page))
}

/// DELETE /api/v1/pages/{id}
///
/// Blocks, version snapshots, and preview tokens cascade.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PageRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Page", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

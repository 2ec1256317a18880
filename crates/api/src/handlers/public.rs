//! Handlers for the unauthenticated public read path.
//!
//! Only published pages are visible, and only published block content is
//! ever serialized — drafts never cross this boundary. A missing page and
//! an unpublished page produce the same 404, and blocks that have never
//! been published are simply omitted, so clients degrade to fallback copy
//! instead of erroring.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;

use hasta_db::repositories::{BlockRepo, PageRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Public shape of a published block.
#[derive(Debug, Serialize)]
pub struct PublicBlock {
    pub block_key: String,
    pub block_type: String,
    pub content: JsonValue,
    pub display_order: i32,
}

/// Public shape of a published page.
#[derive(Debug, Serialize)]
pub struct PublicPage {
    pub slug: String,
    pub title: String,
    pub blocks: Vec<PublicBlock>,
}

/// GET /api/v1/public/pages/{slug}
pub async fn get_published_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PublicPage>> {
    let page = PageRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No published page for slug '{slug}'")))?;

    let blocks = BlockRepo::list_by_page(&state.pool, page.id)
        .await?
        .into_iter()
        .filter_map(|block| {
            let content = block.content_published?;
            Some(PublicBlock {
                block_key: block.block_key,
                block_type: block.block_type,
                content,
                display_order: block.display_order,
            })
        })
        .collect();

    Ok(Json(PublicPage {
        slug: page.slug,
        title: page.title,
        blocks,
    }))
}

//! Route definitions for pages and their nested block / preview-token
//! collections.
//!
//! Mounted at `/pages`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{block, page, preview};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(page::list).post(page::create))
        .route("/by-slug/{slug}", get(page::get_by_slug))
        .route(
            "/{id}",
            get(page::get_by_id).put(page::update).delete(page::delete),
        )
        .route(
            "/{id}/blocks",
            get(block::list_by_page).post(block::create),
        )
        .route("/{id}/blocks/reorder", put(block::reorder))
        .route(
            "/{id}/preview-tokens",
            get(preview::list_tokens).post(preview::create_token),
        )
}

//! Route definitions for block-level operations: draft mutation, advisory
//! validation, publish, and version history.
//!
//! Mounted at `/blocks`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{block, version};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(block::get_by_id).delete(block::delete))
        .route("/{id}/draft", put(block::update_draft))
        .route("/{id}/validate", post(block::validate))
        .route("/{id}/publish", post(block::publish))
        .route("/{id}/versions", get(version::list_by_block))
        .route("/{id}/versions/{version_id}/revert", post(version::revert))
}

//! Route definitions for the token-gated draft view and token cleanup.
//!
//! Merged at the `/api/v1` root: the preview URL is the whole point of the
//! feature, so it stays short enough to paste into a chat message.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::preview;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/preview/{token}", get(preview::preview_page))
        .route("/preview-tokens/expired", delete(preview::cleanup_expired))
}

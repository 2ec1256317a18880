//! Route definitions, one module per resource, composed into `/api/v1`.

pub mod block;
pub mod health;
pub mod page;
pub mod preview;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pages                                           list, create
/// /pages/by-slug/{slug}                            editor load (page + blocks)
/// /pages/{id}                                      get, update, delete
/// /pages/{id}/blocks                               list, create
/// /pages/{id}/blocks/reorder                       reorder (PUT)
/// /pages/{id}/preview-tokens                       list, issue
///
/// /blocks/{id}                                     get, delete
/// /blocks/{id}/draft                               overwrite draft (PUT)
/// /blocks/{id}/validate                            advisory validation (POST)
/// /blocks/{id}/publish                             publish draft (POST)
/// /blocks/{id}/versions                            version history (GET)
/// /blocks/{id}/versions/{version_id}/revert        stage snapshot as draft (POST)
///
/// /preview/{token}                                 token-gated draft view (GET)
/// /preview-tokens/expired                          cleanup expired (DELETE)
///
/// /public/pages/{slug}                             published content only (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pages", page::router())
        .nest("/blocks", block::router())
        .nest("/public", public::router())
        .merge(preview::router())
}

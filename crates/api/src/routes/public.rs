//! Route definitions for the unauthenticated public read path.
//!
//! Mounted at `/public`.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pages/{slug}", get(public::get_published_page))
}

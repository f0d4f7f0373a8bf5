//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// ```text
/// GET    /    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(items::list))
}

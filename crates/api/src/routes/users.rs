//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /me                  -> me
/// GET    /me/items            -> my_items
/// GET    /{user_id}           -> get_by_id
/// POST   /{user_id}/items     -> create_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route("/me", get(users::me))
        .route("/me/items", get(users::my_items))
        .route("/{user_id}", get(users::get_by_id))
        .route("/{user_id}/items", post(users::create_item))
}

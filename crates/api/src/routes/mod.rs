pub mod auth;
pub mod health;
pub mod items;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /token                          login (public)
///
/// /users                          list, create (auth required)
/// /users/me                       caller's profile
/// /users/me/items                 caller's items
/// /users/{user_id}                get
/// /users/{user_id}/items          create item for user
///
/// /items                          list (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/items", items::router())
}

//! Handlers for the `/items` resource.

use axum::extract::Query;
use axum::Json;
use sqlapp_db::models::item::Item;
use sqlapp_db::repositories::ItemRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::db::DbConn;
use crate::query::PaginationParams;

/// GET /api/v1/items
pub async fn list(
    _auth: AuthUser,
    DbConn(mut conn): DbConn,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Item>>> {
    let (offset, limit) = params.resolve();
    let items = ItemRepo::list(&mut conn, offset, limit).await?;
    Ok(Json(items))
}

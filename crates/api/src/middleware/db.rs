//! Per-request database connection extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sqlx::pool::PoolConnection;
use sqlx::Postgres;

use crate::error::AppError;
use crate::state::AppState;

/// A pooled connection owned by a single request.
///
/// The connection goes back to the pool when this value is dropped, which
/// happens on every way out of the handler: normal return, `?` early return,
/// or unwinding. Handlers reborrow it as `&mut *conn` for repository calls.
pub struct DbConn(pub PoolConnection<Postgres>);

impl FromRequestParts<AppState> for DbConn {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let conn = state.pool.acquire().await?;
        Ok(DbConn(conn))
    }
}

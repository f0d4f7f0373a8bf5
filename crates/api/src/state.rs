use std::sync::Arc;

use sqlapp_db::DbPool;

use crate::auth::jwt::TokenService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration, read-only after startup.
    pub config: Arc<ServerConfig>,
    /// Token signer/verifier built once from `config.jwt`.
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        Self {
            pool,
            config: Arc::new(config),
            tokens,
        }
    }
}

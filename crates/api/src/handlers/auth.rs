//! Handler for `POST /token` (password login).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::credentials::authenticate;
use crate::auth::error::AuthError;
use crate::error::{AppError, AppResult};
use crate::middleware::db::DbConn;
use crate::state::AppState;

/// Request body for `POST /token`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// POST /api/v1/token
///
/// Exchange a username and password for a bearer access token. Any mismatch
/// is a 401 with the same message whether the username or the password was
/// wrong. A disabled account with the right password is a 403.
pub async fn login(
    State(state): State<AppState>,
    DbConn(mut conn): DbConn,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = authenticate(&mut *conn, &input.username, &input.password)
        .await?
        .ok_or_else(|| {
            tracing::info!(username = %input.username, "Login rejected");
            AppError::Auth(AuthError::InvalidCredentials)
        })?;

    if !user.is_active {
        tracing::info!(user_id = user.id, "Login refused for disabled account");
        return Err(AppError::Auth(AuthError::UserInactive));
    }

    let ttl = state.tokens.access_token_ttl();
    let access_token = state
        .tokens
        .issue_token(&user.username, ttl)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: ttl.num_seconds(),
    }))
}

//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use sqlapp_db::models::user::User;

use crate::auth::error::AuthFailure;
use crate::auth::gate::authorize;
use crate::error::AppError;
use crate::state::AppState;

/// The active user behind the request's `Authorization: Bearer` token.
///
/// Add this as the first extractor parameter of any handler that requires
/// authentication; the handler body only runs if the gate accepted the token:
///
/// ```ignore
/// async fn my_handler(AuthUser(user): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A pool hands out a connection for the single lookup and takes it
        // back as soon as the lookup returns. Token checks run first, so a
        // bad token never touches the database.
        let mut users = state.pool.clone();

        match authorize(bearer_token(&parts.headers), &state.tokens, &mut users).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(err) => {
                match err.failure() {
                    Some(AuthFailure::Unauthenticated) => {
                        tracing::debug!(reason = %err, path = %parts.uri.path(), "Rejected bearer token");
                    }
                    Some(AuthFailure::Forbidden) => {
                        tracing::info!(reason = %err, path = %parts.uri.path(), "Refused disabled account");
                    }
                    None => {}
                }
                Err(AppError::Auth(err))
            }
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme, or an empty token all count as "no token presented".
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

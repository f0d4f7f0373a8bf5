//! The authorization gate every protected route passes through.
//!
//! [`authorize`] turns the raw bearer token of one request into the active
//! user it belongs to, or an [`AuthError`] saying why not. It keeps no state
//! between calls; the user record is re-read on every request, so disabling
//! an account takes effect on that account's next request even while its
//! tokens are still within their lifetime.

use chrono::Utc;
use sqlapp_core::types::Timestamp;
use sqlapp_db::models::user::User;
use sqlapp_db::UserLookup;

use super::error::AuthError;
use super::jwt::TokenService;

/// Resolve a bearer token to an active user, checking expiry against the
/// current time.
pub async fn authorize<L>(
    raw_token: Option<&str>,
    tokens: &TokenService,
    users: &mut L,
) -> Result<User, AuthError>
where
    L: UserLookup + ?Sized,
{
    authorize_at(raw_token, tokens, users, Utc::now()).await
}

/// [`authorize`] with an explicit clock.
///
/// Steps, in order:
/// 1. no token → [`AuthError::MissingToken`]
/// 2. token fails to parse → [`AuthError::Token`]
/// 3. subject not in the store → [`AuthError::UserNotFound`]
/// 4. user disabled → [`AuthError::UserInactive`]
pub async fn authorize_at<L>(
    raw_token: Option<&str>,
    tokens: &TokenService,
    users: &mut L,
    now: Timestamp,
) -> Result<User, AuthError>
where
    L: UserLookup + ?Sized,
{
    let token = raw_token.ok_or(AuthError::MissingToken)?;
    let claims = tokens.parse_token_at(token, now)?;

    let user = users
        .get_user_by_username(&claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    if !user.is_active {
        return Err(AuthError::UserInactive);
    }
    Ok(user)
}

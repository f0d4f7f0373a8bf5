//! Username/password authentication against the user store.

use std::sync::LazyLock;

use sqlapp_db::models::user::User;
use sqlapp_db::UserLookup;

use super::error::AuthError;
use super::password::{hash_password, verify_password};

/// Stands in for the stored hash when the username is unknown, so that a
/// miss costs the same Argon2 work as a wrong password.
static PLACEHOLDER_HASH: LazyLock<String> = LazyLock::new(|| {
    hash_password("placeholder-for-unknown-users").expect("hashing a constant cannot fail")
});

/// Check a username/password pair.
///
/// Returns the user only when the username exists and the password matches
/// its stored hash. An unknown username and a wrong password both yield
/// `Ok(None)` after the same amount of hashing; only a failure to read the
/// store (or a crashed hashing task) is an `Err`. Whether the account is
/// active is not checked here.
pub async fn authenticate<L>(
    users: &mut L,
    username: &str,
    password: &str,
) -> Result<Option<User>, AuthError>
where
    L: UserLookup + ?Sized,
{
    let user = users.get_user_by_username(username).await?;

    let stored_hash = match &user {
        Some(user) => user.password_hash.clone(),
        None => PLACEHOLDER_HASH.as_str().to_owned(),
    };
    let password = password.to_owned();
    let verified =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?;

    let Some(user) = user else {
        return Ok(None);
    };
    match verified {
        Ok(true) => Ok(Some(user)),
        Ok(false) => Ok(None),
        Err(e) => {
            tracing::error!(user_id = user.id, error = %e, "Stored password hash is unreadable");
            Ok(None)
        }
    }
}

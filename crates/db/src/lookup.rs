//! Read-only user lookup used by the authentication layer.
//!
//! The auth code only ever needs to resolve a user by name (login, token
//! subject) or by id. Abstracting that behind a trait lets the gate run
//! against a pooled connection in production and an in-memory map in tests.

use async_trait::async_trait;
use sqlx::PgConnection;
use sqlapp_core::types::DbId;

use crate::models::user::User;
use crate::repositories::UserRepo;

#[async_trait]
pub trait UserLookup: Send {
    /// Resolve a user by unique username.
    async fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, sqlx::Error>;

    /// Resolve a user by internal id.
    async fn get_user(&mut self, id: DbId) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
impl UserLookup for PgConnection {
    async fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_username(self, username).await
    }

    async fn get_user(&mut self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_id(self, id).await
    }
}

/// Each call borrows a connection from the pool for the duration of the
/// query only.
#[async_trait]
impl UserLookup for sqlx::PgPool {
    async fn get_user_by_username(&mut self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let mut conn = self.acquire().await?;
        UserRepo::find_by_username(&mut conn, username).await
    }

    async fn get_user(&mut self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let mut conn = self.acquire().await?;
        UserRepo::find_by_id(&mut conn, id).await
    }
}

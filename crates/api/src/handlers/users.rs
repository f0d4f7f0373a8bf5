//! Handlers for the `/users` resource and the caller's own profile.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlapp_core::error::CoreError;
use sqlapp_core::types::DbId;
use sqlapp_db::models::item::{CreateItem, Item};
use sqlapp_db::models::user::{CreateUser, User};
use sqlapp_db::repositories::{ItemRepo, UserRepo};
use sqlapp_db::UserLookup;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::db::DbConn;
use crate::query::PaginationParams;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

/// Public user representation (no password hash), with owned items.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub items: Vec<Item>,
}

impl UserResponse {
    fn new(user: User, items: Vec<Item>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            items,
        }
    }
}

/// Reject a registration the login endpoint could never match.
///
/// Usernames are stored and looked up exactly as given, so surrounding
/// whitespace is refused rather than silently trimmed.
fn validate_new_user(input: &CreateUserRequest) -> Result<(), CoreError> {
    if input.username.is_empty() {
        return Err(CoreError::Validation("username must not be empty".into()));
    }
    if input.username.trim() != input.username {
        return Err(CoreError::Validation(
            "username must not start or end with whitespace".into(),
        ));
    }
    if input.password.is_empty() {
        return Err(CoreError::Validation("password must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
pub async fn me(
    AuthUser(user): AuthUser,
    DbConn(mut conn): DbConn,
) -> AppResult<Json<UserResponse>> {
    let items = ItemRepo::list_by_owner(&mut conn, user.id).await?;
    Ok(Json(UserResponse::new(user, items)))
}

/// GET /api/v1/users/me/items
pub async fn my_items(
    AuthUser(user): AuthUser,
    DbConn(mut conn): DbConn,
) -> AppResult<Json<Vec<Item>>> {
    let items = ItemRepo::list_by_owner(&mut conn, user.id).await?;
    Ok(Json(items))
}

/// POST /api/v1/users
///
/// Register a new user. Returns 400 if the email is already taken and 409 if
/// the username is.
pub async fn create(
    AuthUser(caller): AuthUser,
    DbConn(mut conn): DbConn,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_new_user(&input)?;

    if let Some(email) = input.email.as_deref() {
        if UserRepo::find_by_email(&mut conn, email).await?.is_some() {
            return Err(AppError::BadRequest("Email already registered".into()));
        }
    }

    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &mut conn,
        &CreateUser {
            username: input.username,
            email: input.email,
            full_name: input.full_name,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, created_by = caller.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::new(user, Vec::new()))))
}

/// GET /api/v1/users?skip=&limit=
pub async fn list(
    _auth: AuthUser,
    DbConn(mut conn): DbConn,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let (offset, limit) = params.resolve();
    let users = UserRepo::list(&mut conn, offset, limit).await?;

    let ids: Vec<DbId> = users.iter().map(|u| u.id).collect();
    let mut items_by_owner: HashMap<DbId, Vec<Item>> = HashMap::new();
    for item in ItemRepo::list_by_owners(&mut conn, &ids).await? {
        items_by_owner.entry(item.owner_id).or_default().push(item);
    }

    let response = users
        .into_iter()
        .map(|user| {
            let items = items_by_owner.remove(&user.id).unwrap_or_default();
            UserResponse::new(user, items)
        })
        .collect();
    Ok(Json(response))
}

/// GET /api/v1/users/{user_id}
pub async fn get_by_id(
    _auth: AuthUser,
    DbConn(mut conn): DbConn,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = conn
        .get_user(user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    let items = ItemRepo::list_by_owner(&mut conn, user.id).await?;
    Ok(Json(UserResponse::new(user, items)))
}

/// POST /api/v1/users/{user_id}/items
pub async fn create_item(
    AuthUser(caller): AuthUser,
    DbConn(mut conn): DbConn,
    Path(user_id): Path<DbId>,
    Json(input): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()).into());
    }

    if conn.get_user(user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }

    let item = ItemRepo::create_for_owner(&mut conn, user_id, &input).await?;
    tracing::info!(item_id = item.id, owner_id = user_id, created_by = caller.id, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}

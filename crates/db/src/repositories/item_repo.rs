//! Repository for the `items` table.

use sqlx::PgConnection;
use sqlapp_core::types::DbId;

use crate::models::item::{CreateItem, Item};

const COLUMNS: &str = "id, title, description, owner_id, created_at, updated_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item owned by `owner_id`, returning the created row.
    pub async fn create_for_owner(
        conn: &mut PgConnection,
        owner_id: DbId,
        input: &CreateItem,
    ) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (title, description, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(owner_id)
            .fetch_one(conn)
            .await
    }

    /// List items in id order, one page at a time.
    pub async fn list(
        conn: &mut PgConnection,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY id OFFSET $1 LIMIT $2");
        sqlx::query_as::<_, Item>(&query)
            .bind(offset)
            .bind(limit)
            .fetch_all(conn)
            .await
    }

    /// All items owned by a single user.
    pub async fn list_by_owner(
        conn: &mut PgConnection,
        owner_id: DbId,
    ) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE owner_id = $1 ORDER BY id");
        sqlx::query_as::<_, Item>(&query)
            .bind(owner_id)
            .fetch_all(conn)
            .await
    }

    /// All items owned by any of `owner_ids`, in a single round trip.
    pub async fn list_by_owners(
        conn: &mut PgConnection,
        owner_ids: &[DbId],
    ) -> Result<Vec<Item>, sqlx::Error> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM items WHERE owner_id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Item>(&query)
            .bind(owner_ids)
            .fetch_all(conn)
            .await
    }
}

//! Item repository
//!
//! Handles item CRUD:
//! - create: INSERT with a fresh UUID; duplicate names map to `Conflict`
//! - update: COALESCE per column so unset fields keep their value
//! - delete: RETURNING the removed row; rows still stocked map to `BlockedByReference`

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

use crate::models::{Pagination, Patch, RecordName};
use super::{DbError, ForeignKeyRole};

const RESOURCE: &str = "item";

/// Item record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Validated input for a new item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: RecordName,
    pub description: String,
}

/// Validated partial update for an item
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub name: Patch<RecordName>,
    pub description: Patch<String>,
}

/// Item repository over a single acquired connection
pub struct ItemRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ItemRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List items ordered by name.
    pub async fn list(&mut self, page: Pagination) -> Result<Vec<Item>, DbError> {
        let items: Vec<Item> = sqlx::query_as(
            r#"
            SELECT id, name, description
            FROM items
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(items)
    }

    /// Get a single item by id.
    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Item, DbError> {
        sqlx::query_as("SELECT id, name, description FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Get a single item by its unique name.
    pub async fn get_by_name(&mut self, name: &str) -> Result<Item, DbError> {
        sqlx::query_as("SELECT id, name, description FROM items WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, name))
    }

    /// Insert a new item under a freshly generated id.
    pub async fn create(&mut self, item: NewItem) -> Result<Item, DbError> {
        let created: Item = sqlx::query_as(
            r#"
            INSERT INTO items (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(item.name.as_str())
        .bind(&item.description)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Parent))?;

        tracing::info!(item_id = %created.id, name = %created.name, "item created");
        Ok(created)
    }

    /// Apply the supplied fields; unset fields keep their stored value.
    pub async fn update(&mut self, id: Uuid, changes: ItemChanges) -> Result<Item, DbError> {
        let updated: Option<Item> = sqlx::query_as(
            r#"
            UPDATE items SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(changes.name.into_option().map(RecordName::into_string))
        .bind(changes.description.into_option())
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Parent))?;

        let updated = updated.ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::debug!(item_id = %id, "item updated");
        Ok(updated)
    }

    /// Delete an item, returning the removed record.
    pub async fn delete(&mut self, id: Uuid) -> Result<Item, DbError> {
        let deleted: Option<Item> = sqlx::query_as(
            "DELETE FROM items WHERE id = $1 RETURNING id, name, description",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Parent))?;

        let deleted = deleted.ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::info!(item_id = %id, "item deleted");
        Ok(deleted)
    }
}

//! Store repository
//!
//! Same lifecycle as items, plus an address column.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

use crate::models::{Pagination, Patch, RecordName};
use super::{DbError, ForeignKeyRole};

const RESOURCE: &str = "store";

/// Store record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
}

/// Validated input for a new store
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: RecordName,
    pub description: String,
    pub address: String,
}

/// Validated partial update for a store
#[derive(Debug, Clone, Default)]
pub struct StoreChanges {
    pub name: Patch<RecordName>,
    pub description: Patch<String>,
    pub address: Patch<String>,
}

/// Store repository over a single acquired connection
pub struct StoreRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> StoreRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// List stores ordered by name.
    pub async fn list(&mut self, page: Pagination) -> Result<Vec<Store>, DbError> {
        let stores: Vec<Store> = sqlx::query_as(
            r#"
            SELECT id, name, description, address
            FROM stores
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(stores)
    }

    /// Get a single store by id.
    pub async fn get_by_id(&mut self, id: Uuid) -> Result<Store, DbError> {
        sqlx::query_as("SELECT id, name, description, address FROM stores WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Get a single store by its unique name.
    pub async fn get_by_name(&mut self, name: &str) -> Result<Store, DbError> {
        sqlx::query_as("SELECT id, name, description, address FROM stores WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, name))
    }

    /// Insert a new store under a freshly generated id.
    pub async fn create(&mut self, store: NewStore) -> Result<Store, DbError> {
        let created: Store = sqlx::query_as(
            r#"
            INSERT INTO stores (id, name, description, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, address
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(store.name.as_str())
        .bind(&store.description)
        .bind(&store.address)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Parent))?;

        tracing::info!(store_id = %created.id, name = %created.name, "store created");
        Ok(created)
    }

    /// Apply the supplied fields; unset fields keep their stored value.
    pub async fn update(&mut self, id: Uuid, changes: StoreChanges) -> Result<Store, DbError> {
        let updated: Option<Store> = sqlx::query_as(
            r#"
            UPDATE stores SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                address = COALESCE($4, address)
            WHERE id = $1
            RETURNING id, name, description, address
            "#,
        )
        .bind(id)
        .bind(changes.name.into_option().map(RecordName::into_string))
        .bind(changes.description.into_option())
        .bind(changes.address.into_option())
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Parent))?;

        let updated = updated.ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::debug!(store_id = %id, "store updated");
        Ok(updated)
    }

    /// Delete a store, returning the removed record.
    pub async fn delete(&mut self, id: Uuid) -> Result<Store, DbError> {
        let deleted: Option<Store> = sqlx::query_as(
            "DELETE FROM stores WHERE id = $1 RETURNING id, name, description, address",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Parent))?;

        let deleted = deleted.ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::info!(store_id = %id, "store deleted");
        Ok(deleted)
    }
}

//! Schema migrations for items, stores and stock
//!
//! Every statement is idempotent so startup can run them unconditionally.
//! Concurrent runners are serialized on an advisory lock held for the
//! duration of the migration transaction.

use sqlx::PgPool;

/// Advisory lock key for schema migrations
const MIGRATION_LOCK_KEY: i64 = 0x5354_4f43_4b52_4d;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running stockroom migrations...");

    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stores (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // No ON DELETE action: removing a referenced item/store must fail
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS stock (
            item_id UUID NOT NULL REFERENCES items(id),
            store_id UUID NOT NULL REFERENCES stores(id),
            available BIGINT NOT NULL DEFAULT 0 CHECK (available >= 0),
            sold BIGINT NOT NULL DEFAULT 0 CHECK (sold >= 0),
            price NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (price >= 0),
            PRIMARY KEY (item_id, store_id)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Foreign-key checks when a store is deleted
    sqlx::query("CREATE INDEX IF NOT EXISTS stock_store_id_idx ON stock (store_id)")
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!("Migrations complete");
    Ok(())
}

//! Stock repository
//!
//! Stock rows are keyed by (item_id, store_id) and only ever change through
//! [`StockRepo::adjust`]: quantities move by deltas, price is replaced, and
//! every column is floored at zero. The merge runs server-side as a single
//! `INSERT .. ON CONFLICT DO UPDATE`, so concurrent adjustments of the same
//! key serialize on the row lock instead of racing a read-then-write.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Connection, FromRow, PgConnection};
use uuid::Uuid;

use crate::models::Pagination;
use super::{DbError, ForeignKeyRole};

const RESOURCE: &str = "stock";

/// Stock record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Stock {
    pub item_id: Uuid,
    pub store_id: Uuid,
    pub available: i64,
    pub sold: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Stock row joined with its item and store names
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct StockReport {
    pub item_id: Uuid,
    pub store_id: Uuid,
    pub available: i64,
    pub sold: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Item name
    pub item: String,
    /// Store name
    pub store: String,
}

/// One stock adjustment.
///
/// `available` and `sold` are signed deltas; `price` replaces the stored
/// price when present. Missing values count as zero on first insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub item_id: Uuid,
    pub store_id: Uuid,
    pub available: Option<i64>,
    pub sold: Option<i64>,
    pub price: Option<Decimal>,
}

/// Stock repository over a single acquired connection
pub struct StockRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> StockRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Create or merge the stock row for (item, store) and return the result.
    ///
    /// - new row: each column is `max(value or 0, 0)`
    /// - existing row: quantities are `max(current + delta, 0)`, price is
    ///   `max(new price or current price, 0)`
    ///
    /// Unknown item or store ids fail with `InvalidReference`.
    pub async fn adjust(&mut self, adjustment: StockAdjustment) -> Result<Stock, DbError> {
        let mut tx = self.conn.begin().await?;

        let stock: Stock = sqlx::query_as(
            r#"
            INSERT INTO stock AS s (item_id, store_id, available, sold, price)
            VALUES (
                $1,
                $2,
                GREATEST(COALESCE($3::bigint, 0), 0),
                GREATEST(COALESCE($4::bigint, 0), 0),
                GREATEST(COALESCE($5::numeric, 0), 0)
            )
            ON CONFLICT (item_id, store_id) DO UPDATE SET
                available = GREATEST(s.available + COALESCE($3::bigint, 0), 0),
                sold = GREATEST(s.sold + COALESCE($4::bigint, 0), 0),
                price = GREATEST(COALESCE($5::numeric, s.price), 0)
            RETURNING item_id, store_id, available, sold, price
            "#,
        )
        .bind(adjustment.item_id)
        .bind(adjustment.store_id)
        .bind(adjustment.available)
        .bind(adjustment.sold)
        .bind(adjustment.price)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::from_write(e, RESOURCE, ForeignKeyRole::Child))?;

        tx.commit().await?;

        tracing::info!(
            item_id = %stock.item_id,
            store_id = %stock.store_id,
            available = stock.available,
            sold = stock.sold,
            price = %stock.price,
            "stock adjusted"
        );
        Ok(stock)
    }

    /// List all stock rows ordered by item name.
    pub async fn list(&mut self, page: Pagination) -> Result<Vec<StockReport>, DbError> {
        let rows: Vec<StockReport> = sqlx::query_as(
            r#"
            SELECT s.item_id, s.store_id, s.available, s.sold, s.price,
                   i.name AS item, st.name AS store
            FROM stock s
            JOIN items i ON i.id = s.item_id
            JOIN stores st ON st.id = s.store_id
            ORDER BY i.name, st.name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// List one item's stock across stores, ordered by store name.
    pub async fn list_for_item(
        &mut self,
        item_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<StockReport>, DbError> {
        let rows: Vec<StockReport> = sqlx::query_as(
            r#"
            SELECT s.item_id, s.store_id, s.available, s.sold, s.price,
                   i.name AS item, st.name AS store
            FROM stock s
            JOIN items i ON i.id = s.item_id
            JOIN stores st ON st.id = s.store_id
            WHERE s.item_id = $1
            ORDER BY st.name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(item_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }

    /// List one item's stock across stores by item name, ordered by store name.
    pub async fn list_for_item_name(
        &mut self,
        item_name: &str,
        page: Pagination,
    ) -> Result<Vec<StockReport>, DbError> {
        let rows: Vec<StockReport> = sqlx::query_as(
            r#"
            SELECT s.item_id, s.store_id, s.available, s.sold, s.price,
                   i.name AS item, st.name AS store
            FROM stock s
            JOIN items i ON i.id = s.item_id
            JOIN stores st ON st.id = s.store_id
            WHERE i.name = $1
            ORDER BY st.name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(item_name)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(rows)
    }
}

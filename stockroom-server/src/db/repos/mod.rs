//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows one acquired connection for the whole request
//! - Relies on DB constraints and maps violations (no check-then-insert)
//! - Single-statement writes; the stock merge adds an explicit transaction

pub mod items;
pub mod stores;
pub mod stock;

pub use super::error::{DbError, ForeignKeyRole, Violation};
pub use items::{Item, ItemChanges, ItemRepo, NewItem};
pub use stores::{NewStore, Store, StoreChanges, StoreRepo};
pub use stock::{Stock, StockAdjustment, StockReport, StockRepo};

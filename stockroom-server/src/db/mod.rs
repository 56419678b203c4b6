//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - One pooled connection per request, returned to the pool on drop
//! - Rely on DB constraints, map violations - no check-then-insert
//! - Atomic upsert for stock merges - no read-modify-write in Rust

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;

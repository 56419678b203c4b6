//! stockroom-server: HTTP API for items, stores and per-store stock
//!
//! Every request is a stateless round-trip: a handler acquires one pooled
//! PostgreSQL connection, runs a single parameterized statement through a
//! repository, and maps the outcome (record, absence, constraint violation)
//! to an HTTP response.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, DbError};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};

//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use stockroom_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (PostgreSQL connection string)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create or update the items, stores and stock tables
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool(database_url)
        .await
        .context("Failed to create database pool")?;

    let result = migrations::run(&pool).await.context("Failed to run migrations");
    pool.close().await;
    result
}

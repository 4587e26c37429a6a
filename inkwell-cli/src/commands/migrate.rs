use anyhow::{Context, Result};
use inkwell_server::{create_pool, migrate};

use crate::config::StoreArgs;

/// Apply pending schema migrations and exit.
pub async fn run_migrate(args: StoreArgs) -> Result<()> {
    let pool = create_pool(&args.store_config()?)
        .await
        .context("Failed to create database pool")?;

    migrate(&pool).await.context("Failed to apply migrations")?;
    pool.close().await;

    println!("Migrations applied");
    Ok(())
}

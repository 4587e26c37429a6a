//! HTTP server command
//!
//! Connects to the store, applies pending migrations and serves the blog API
//! until Ctrl+C or SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use inkwell_server::{create_pool, migrate, run_server, ServerConfig};

use crate::config::StoreArgs;

/// Serve command arguments
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Skip applying migrations on startup
    #[arg(long)]
    pub no_migrate: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = args.store.store_config()?;
    tracing::debug!(?store, "connecting to store");

    let pool = create_pool(&store)
        .await
        .context("Failed to create database pool")?;

    if !args.no_migrate {
        migrate(&pool).await.context("Failed to apply migrations")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting inkwell server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}

//! inkwell CLI - serve and maintain a personal blog backend
//!
//! - `serve`: run the JSON API for blogs and tags
//! - `migrate`: apply schema migrations
//! - `status`: check store connectivity

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use commands::ServeArgs;
use config::StoreArgs;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "inkwell",
    author,
    version,
    about = "Blog backend: posts, tags and their links over a small JSON API"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the blog API
    Serve(ServeArgs),
    /// Apply pending schema migrations
    Migrate(StoreArgs),
    /// Check that the store is reachable
    Status(StoreArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing: flags fall back to variables the .env files provide.
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug }).ok();
    dotenv.log();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Status(args) => commands::run_status(args).await?,
    }
    Ok(())
}

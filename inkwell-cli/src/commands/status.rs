//! Store connectivity check

use anyhow::{bail, Context, Result};
use inkwell_server::db::{create_lazy_pool, ping};

use crate::config::StoreArgs;

/// Run `SELECT 1` against the store and report the outcome.
///
/// Exits non-zero when the store is unreachable.
pub async fn run_status(args: StoreArgs) -> Result<()> {
    let store = args.store_config()?;
    let pool = create_lazy_pool(&store).context("Invalid store configuration")?;

    let outcome = ping(&pool).await;
    pool.close().await;

    match outcome {
        Ok(()) => {
            println!("database: ok");
            Ok(())
        }
        Err(e) => {
            println!("database: unreachable");
            bail!("store connectivity check failed: {e}")
        }
    }
}

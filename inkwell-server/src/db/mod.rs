//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool shared by every request - no Arc<Mutex<Connection>>
//! - List operations aggregate with JOINs - no N+1 queries
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Blog create is NOT one transaction: the blog row and its tag links are
//!   separate statements, and a failed link leaves the blog in place

pub mod pool;
pub mod repos;

pub use pool::{create_lazy_pool, create_pool, StoreConfig};
pub use repos::*;

use sqlx::PgPool;

/// Embedded schema migrations (`migrations/` at the workspace root).
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");

/// Apply pending schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Cheap connectivity probe used by `/status` and `inkwell status`.
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

//! Database connection pool management
//!
//! The store is reached with two credentials: an endpoint URL and an access
//! key. The key is applied as the connection password, overriding whatever
//! password the URL carries.

use std::fmt;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
/// Kept low for a single-author blog.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Credentials and sizing for the backing store
#[derive(Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Access key, used as the connection password
    pub access_key: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl StoreConfig {
    pub fn new(url: impl Into<String>, access_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_key: access_key.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Parse the URL and apply the access key.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a valid PostgreSQL connection string.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = PgConnectOptions::from_str(&self.url)?;
        Ok(options.password(&self.access_key))
    }
}

// The access key never ends up in logs.
impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("access_key", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Create a PostgreSQL connection pool and open the first connection.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the connection fails.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("postgres://db.example.com/postgres", key);
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
}

/// Create a pool that connects on first use.
pub fn create_lazy_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(config.connect_options()?))
}

//! Environment loading and store credentials
//!
//! Precedence for every setting: command-line flag, then process
//! environment, then `./.env`, then `~/.inkwell/.env`. dotenvy never
//! overwrites a variable that is already set, so loading the files in that
//! order gives the right result.
//!
//! Flags read their `env` fallbacks while clap parses, so the files must be
//! loaded before `Cli::parse` runs. That is also before tracing exists, so
//! the loader reports what it read instead of logging it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use inkwell_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use inkwell_server::StoreConfig;
use tracing::{debug, info, warn};

/// Environment variable holding the PostgreSQL URL
pub const DATABASE_URL_ENV: &str = "INKWELL_DATABASE_URL";

/// Environment variable holding the store access key
pub const DATABASE_KEY_ENV: &str = "INKWELL_DATABASE_KEY";

/// Outcome of [`load_dotenv`], logged once tracing is up
#[derive(Debug, Default)]
pub struct DotenvReport {
    pub loaded_from: Vec<String>,
    pub failures: Vec<String>,
}

impl DotenvReport {
    pub fn log(&self) {
        for failure in &self.failures {
            warn!("{}", failure);
        }
        if self.loaded_from.is_empty() {
            debug!("No .env files found (current dir or ~/.inkwell)");
        } else {
            info!("Loaded configuration from: {}", self.loaded_from.join(", "));
        }
    }
}

/// Load `.env` from the current directory, then `~/.inkwell/.env`.
pub fn load_dotenv() -> DotenvReport {
    let mut report = DotenvReport::default();

    match dotenvy::dotenv() {
        Ok(path) => report
            .loaded_from
            .push(format!("current directory ({})", path.display())),
        Err(e) if e.not_found() => {}
        Err(e) => report.failures.push(format!("Failed to load ./.env: {e}")),
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => report
                    .loaded_from
                    .push(format!("~/.inkwell/.env ({})", env_file.display())),
                Err(e) => report
                    .failures
                    .push(format!("Failed to load {}: {}", env_file.display(), e)),
            }
        }
    }

    report
}

/// The inkwell config directory (~/.inkwell)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".inkwell"))
}

/// Store connection flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// PostgreSQL connection URL
    #[arg(long, env = DATABASE_URL_ENV)]
    pub database_url: Option<String>,

    /// Access key for the store, used as the connection password
    #[arg(long, env = DATABASE_KEY_ENV, hide_env_values = true)]
    pub database_key: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl StoreArgs {
    /// Resolve into a store config, failing when either credential is missing.
    pub fn store_config(&self) -> Result<StoreConfig> {
        let url = non_blank(self.database_url.as_deref()).with_context(|| {
            format!("{DATABASE_URL_ENV} not set. Set via --database-url, the environment, or ~/.inkwell/.env")
        })?;
        let key = non_blank(self.database_key.as_deref()).with_context(|| {
            format!("{DATABASE_KEY_ENV} not set. Set via --database-key, the environment, or ~/.inkwell/.env")
        })?;

        Ok(StoreConfig::new(url, key).with_max_connections(self.max_connections))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: Option<&str>, key: Option<&str>) -> StoreArgs {
        StoreArgs {
            database_url: url.map(String::from),
            database_key: key.map(String::from),
            max_connections: 4,
        }
    }

    #[test]
    fn empty_report_logs_without_panicking() {
        let report = DotenvReport::default();
        assert!(report.loaded_from.is_empty());
        report.log();
    }

    #[test]
    fn store_config_requires_url() {
        let err = args(None, Some("secret")).store_config().unwrap_err();
        assert!(err.to_string().contains(DATABASE_URL_ENV));
    }

    #[test]
    fn store_config_rejects_blank_key() {
        let err = args(Some("postgres://localhost/blog"), Some("  "))
            .store_config()
            .unwrap_err();
        assert!(err.to_string().contains(DATABASE_KEY_ENV));
    }

    #[test]
    fn store_config_carries_values() {
        let config = args(Some("postgres://localhost/blog"), Some("secret"))
            .store_config()
            .unwrap();
        assert_eq!(config.url, "postgres://localhost/blog");
        assert_eq!(config.access_key, "secret");
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn config_dir_is_under_home() {
        if let Some(dir) = config_dir() {
            assert!(dir.ends_with(".inkwell"));
        }
    }
}

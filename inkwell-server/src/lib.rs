//! inkwell-server: persistence and HTTP layer for a personal blog
//!
//! Blog posts and tags live in PostgreSQL. Repositories in [`db`] handle
//! pagination, tag filtering, tag get-or-create and the "blog with tags"
//! read model; [`http`] exposes them as a small JSON API.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, migrate, StoreConfig, MIGRATOR};
pub use http::{run_server, ServerConfig};

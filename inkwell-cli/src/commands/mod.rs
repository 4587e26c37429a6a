//! Subcommand implementations

pub mod migrate;
pub mod serve;
pub mod status;

pub use migrate::run_migrate;
pub use serve::{run_serve, ServeArgs};
pub use status::run_status;

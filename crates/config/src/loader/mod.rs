//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files, environment variables, and a JSON config file.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Writing configuration back to disk.
//! - Connecting to the cluster (see client crate).
//!
//! Invariants / Assumptions:
//! - Each source overwrites only the values it sets; the usual order is
//!   file, then environment, then explicit `with_*` overrides.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod builder;
mod env;
mod error;
mod file;

pub use builder::ConfigLoader;
pub use env::{env_var_or_none, parse_hosts};
pub use error::ConfigError;
pub use file::default_config_path;

#[cfg(test)]
mod tests;

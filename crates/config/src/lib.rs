//! Configuration for the Elasticsearch output client.
//!
//! This crate provides types and loaders for cluster endpoint, credential
//! and retry configuration from environment variables and files.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, default_config_path, env_var_or_none, parse_hosts};
pub use types::{AuthConfig, ConnectionConfig, FileConfig, OutputConfig};

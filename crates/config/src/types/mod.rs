//! Configuration types for the ES output client.
//!
//! Responsibilities:
//! - Define the statically typed configuration consumed by the client crate.
//! - Define the partial, all-optional shape of the JSON configuration file.
//!
//! Does NOT handle:
//! - Loading or merging configuration (see `loader` module).
//! - Connecting to the cluster (see client crate).

mod auth;
mod connection;
mod file;

pub use auth::AuthConfig;
pub use connection::{ConnectionConfig, OutputConfig};
pub use file::FileConfig;

//! On-disk configuration file shape.
//!
//! Responsibilities:
//! - Define `FileConfig`, the JSON document read by `ConfigLoader::from_file`.
//!
//! Invariants:
//! - All fields are optional so a file may set only what it cares about.
//! - Unknown fields are rejected to surface typos early.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::types::auth::opt_secret_string;

/// Partial configuration read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Cluster endpoint URLs
    pub hosts: Option<Vec<String>>,
    /// Basic-auth username
    pub username: Option<String>,
    /// Basic-auth password
    #[serde(with = "opt_secret_string")]
    pub password: Option<SecretString>,
    /// Whether to skip TLS verification
    pub skip_verify: Option<bool>,
    /// Per-call timeout in seconds
    pub timeout_seconds: Option<u64>,
    /// Connect timeout in seconds
    pub connect_timeout_seconds: Option<u64>,
    /// Maximum attempts per request
    pub max_retries: Option<usize>,
    /// Pause between attempts in milliseconds
    pub retry_backoff_ms: Option<u64>,
    /// Default index name
    pub index: Option<String>,
}

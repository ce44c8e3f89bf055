//! Connection configuration types for the ES output client.
//!
//! Responsibilities:
//! - Define connection settings (endpoints, TLS verification, timeouts, retries).
//! - Define the main `OutputConfig` structure combining connection and auth.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `timeout` and `connect_timeout` are serialized as seconds, `retry_backoff` as milliseconds.
//! - Default values come from `constants`, not magic numbers.

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_INDEX, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECS,
};
use crate::types::auth::AuthConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Module for serializing Duration as milliseconds (integer).
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Connection settings for one cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Endpoint URLs of the cluster nodes (e.g. `http://es1:9200`).
    ///
    /// May be empty; the client then fails every request with a configuration error.
    pub hosts: Vec<String>,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Per-call timeout covering connect and response read (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// TCP connect timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub connect_timeout: Duration,
    /// Maximum number of attempts for one logical request. Zero makes every request fail.
    pub max_retries: usize,
    /// Pause between attempts (serialized as milliseconds)
    #[serde(with = "duration_millis", default = "default_retry_backoff")]
    pub retry_backoff: Duration,
}

fn default_retry_backoff() -> Duration {
    Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS)
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            hosts: vec![DEFAULT_HOST.to_string()],
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: default_retry_backoff(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Index documents are written to when the caller does not name one
    pub index: String,
}

impl Default for OutputConfig {
    /// Anonymous access to a single local node (`http://localhost:9200`).
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            auth: AuthConfig::default(),
            index: DEFAULT_INDEX.to_string(),
        }
    }
}

impl OutputConfig {
    /// Create a config for the given endpoints with default settings and no credentials.
    pub fn with_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            connection: ConnectionConfig {
                hosts: hosts.into_iter().map(Into::into).collect(),
                ..ConnectionConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_default_config() {
        let config = OutputConfig::default();
        assert_eq!(config.connection.hosts, vec!["http://localhost:9200"]);
        assert_eq!(config.connection.max_retries, 3);
        assert!(config.auth.is_anonymous());
    }

    #[test]
    fn test_with_hosts() {
        let config = OutputConfig::with_hosts(["http://a:9200", "http://b:9200"]);
        assert_eq!(config.connection.hosts.len(), 2);
        assert_eq!(config.connection.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_connection_config_serde_units() {
        let config = ConnectionConfig {
            hosts: vec!["http://localhost:9200".to_string()],
            skip_verify: true,
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(5),
            max_retries: 5,
            retry_backoff: Duration::from_millis(250),
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout"], 60);
        assert_eq!(json["connect_timeout"], 5);
        assert_eq!(json["retry_backoff"], 250);

        let back: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.retry_backoff, Duration::from_millis(250));
        assert_eq!(back.max_retries, 5);
    }

    #[test]
    fn test_retry_backoff_defaults_when_absent() {
        let json = serde_json::json!({
            "hosts": [],
            "skip_verify": false,
            "timeout": 30,
            "connect_timeout": 10,
            "max_retries": 0
        });
        let config: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.retry_backoff, Duration::ZERO);
        assert!(config.hosts.is_empty());
    }

    #[test]
    fn test_config_debug_does_not_expose_secrets() {
        let mut config = OutputConfig::default();
        config.auth.username = Some("elastic".to_string());
        config.auth.password = Some(SecretString::new("my-secret-password".to_string().into()));

        let debug_output = format!("{:?}", config);

        assert!(!debug_output.contains("my-secret-password"));
        assert!(debug_output.contains("elastic"));
        assert!(debug_output.contains("http://localhost:9200"));
    }
}

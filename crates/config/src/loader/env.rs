//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `ES_OUTPUT_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Loading from the config file (see file.rs).
//! - Building the final config (see builder.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::{
    ENV_CONFIG_PATH, ENV_CONNECT_TIMEOUT, ENV_HOSTS, ENV_INDEX, ENV_MAX_RETRIES, ENV_PASSWORD,
    ENV_RETRY_BACKOFF_MS, ENV_SKIP_VERIFY, ENV_TIMEOUT, ENV_USERNAME, MAX_MAX_RETRIES,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Split a comma-separated host list, dropping blank entries.
///
/// ```
/// use es_output_config::parse_hosts;
///
/// assert_eq!(parse_hosts("http://a:9200, http://b:9200,"), vec!["http://a:9200", "http://b:9200"]);
/// ```
pub fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T: FromStr>(var: &str, value: &str, message: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: message.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(hosts) = env_var_or_none(ENV_HOSTS) {
        loader.set_hosts(Some(parse_hosts(&hosts)));
    }
    if let Some(username) = env_var_or_none(ENV_USERNAME) {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none(ENV_PASSWORD) {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(skip) = env_var_or_none(ENV_SKIP_VERIFY) {
        loader.set_skip_verify(Some(parse_var(
            ENV_SKIP_VERIFY,
            &skip,
            "must be true or false",
        )?));
    }
    if let Some(timeout) = env_var_or_none(ENV_TIMEOUT) {
        let secs: u64 = parse_var(ENV_TIMEOUT, &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(timeout) = env_var_or_none(ENV_CONNECT_TIMEOUT) {
        let secs: u64 = parse_var(ENV_CONNECT_TIMEOUT, &timeout, "must be a number")?;
        loader.set_connect_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = env_var_or_none(ENV_MAX_RETRIES) {
        let value: usize = parse_var(
            ENV_MAX_RETRIES,
            &retries,
            "must be a non-negative integer",
        )?;
        if value > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!("must be between 0 and {} (got {})", MAX_MAX_RETRIES, value),
            });
        }
        loader.set_max_retries(Some(value));
    }
    if let Some(backoff) = env_var_or_none(ENV_RETRY_BACKOFF_MS) {
        let millis: u64 = parse_var(ENV_RETRY_BACKOFF_MS, &backoff, "must be a number")?;
        loader.set_retry_backoff(Some(Duration::from_millis(millis)));
    }
    if let Some(index) = env_var_or_none(ENV_INDEX) {
        loader.set_index(Some(index));
    }

    // Only if not already set explicitly
    if loader.config_path().is_none()
        && let Some(config_path) = env_var_or_none(ENV_CONFIG_PATH)
    {
        loader.set_config_path(Some(std::path::PathBuf::from(config_path)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let key1 = "_ES_OUTPUT_TEST_UNSET_VAR";
        assert!(env_var_or_none(key1).is_none(), "Unset env var should return None");

        temp_env::with_vars([(key1, Some(""))], || {
            assert!(env_var_or_none(key1).is_none(), "Empty env var should return None");
        });

        temp_env::with_vars([(key1, Some("   "))], || {
            assert!(
                env_var_or_none(key1).is_none(),
                "Whitespace-only env var should return None"
            );
        });

        let key2 = "_ES_OUTPUT_TEST_SET_VAR";
        temp_env::with_vars([(key2, Some(" test-value "))], || {
            assert_eq!(env_var_or_none(key2), Some("test-value".to_string()));
        });
    }

    #[test]
    fn test_parse_hosts() {
        assert_eq!(
            parse_hosts("http://a:9200,http://b:9200"),
            vec!["http://a:9200", "http://b:9200"]
        );
        assert_eq!(parse_hosts(" http://a:9200 ,, "), vec!["http://a:9200"]);
        assert!(parse_hosts(",").is_empty());
    }
}

//! Config file loading.
//!
//! Responsibilities:
//! - Resolve the config file location (explicit path or platform config directory).
//! - Read the JSON file into a `FileConfig` and apply it to a ConfigLoader.
//!
//! Does NOT handle:
//! - Environment variable parsing (see env.rs).
//! - Building the final config (see builder.rs).
//!
//! Invariants:
//! - A missing file at the default location is not an error.
//! - A missing file at an explicitly requested path is an error.
//! - Errors carry the path and position only, never file content.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::types::FileConfig;

/// Location of the config file in the platform configuration directory.
///
/// # Errors
/// Returns [`ConfigError::ConfigDirUnavailable`] when no home directory can be determined.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("org", "es-output", "es-output")
        .map(|dirs| dirs.config_dir().join("config.json"))
        .ok_or(ConfigError::ConfigDirUnavailable)
}

/// Read and parse a config file.
pub fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileRead {
        path: path.to_path_buf(),
        kind: e.kind(),
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        line: e.line(),
        column: e.column(),
    })
}

/// Apply the config file, if any, to the loader.
pub fn apply_file(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let (path, explicit) = match loader.config_path() {
        Some(path) => (path.clone(), true),
        None => (default_config_path()?, false),
    };

    if !path.exists() {
        if explicit {
            return Err(ConfigError::ConfigFileMissing { path });
        }
        tracing::debug!(path = %path.display(), "No config file at default location");
        return Ok(());
    }

    let file = read_file_config(&path)?;
    tracing::debug!(path = %path.display(), "Loaded config file");
    apply_file_config(loader, file);
    Ok(())
}

fn apply_file_config(loader: &mut ConfigLoader, file: FileConfig) {
    if let Some(hosts) = file.hosts {
        loader.set_hosts(Some(hosts));
    }
    if let Some(username) = file.username {
        loader.set_username(Some(username));
    }
    if let Some(password) = file.password {
        loader.set_password(Some(password));
    }
    if let Some(skip) = file.skip_verify {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = file.timeout_seconds {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(secs) = file.connect_timeout_seconds {
        loader.set_connect_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) = file.max_retries {
        loader.set_max_retries(Some(retries));
    }
    if let Some(millis) = file.retry_backoff_ms {
        loader.set_retry_backoff(Some(Duration::from_millis(millis)));
    }
    if let Some(index) = file.index {
        loader.set_index(Some(index));
    }
}

//! Centralized constants for the ES output workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default per-call HTTP timeout in seconds (connect + response read).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default TCP connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default maximum number of attempts for one logical request.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Default pause between two attempts of the same request, in milliseconds.
///
/// Zero means the next attempt starts as soon as the previous one failed.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 0;

/// Default cluster endpoint used when nothing else is configured.
pub const DEFAULT_HOST: &str = "http://localhost:9200";

/// Default index the CLI writes to when none is given.
pub const DEFAULT_INDEX: &str = "packetbeat";

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Validation Bounds
// =============================================================================

/// Maximum allowed per-call timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed number of attempts for one logical request.
pub const MAX_MAX_RETRIES: usize = 100;

/// Maximum allowed pause between attempts in milliseconds (1 minute).
pub const MAX_RETRY_BACKOFF_MS: u64 = 60_000;

// =============================================================================
// Environment Variables
// =============================================================================

/// Comma-separated list of cluster endpoint URLs.
pub const ENV_HOSTS: &str = "ES_OUTPUT_HOSTS";
/// Basic-auth username.
pub const ENV_USERNAME: &str = "ES_OUTPUT_USERNAME";
/// Basic-auth password.
pub const ENV_PASSWORD: &str = "ES_OUTPUT_PASSWORD";
/// Maximum attempts per request.
pub const ENV_MAX_RETRIES: &str = "ES_OUTPUT_MAX_RETRIES";
/// Per-call timeout in seconds.
pub const ENV_TIMEOUT: &str = "ES_OUTPUT_TIMEOUT";
/// Connect timeout in seconds.
pub const ENV_CONNECT_TIMEOUT: &str = "ES_OUTPUT_CONNECT_TIMEOUT";
/// Pause between attempts in milliseconds.
pub const ENV_RETRY_BACKOFF_MS: &str = "ES_OUTPUT_RETRY_BACKOFF_MS";
/// Skip TLS certificate verification.
pub const ENV_SKIP_VERIFY: &str = "ES_OUTPUT_SKIP_VERIFY";
/// Default index name.
pub const ENV_INDEX: &str = "ES_OUTPUT_INDEX";
/// Path to the JSON configuration file.
pub const ENV_CONFIG_PATH: &str = "ES_OUTPUT_CONFIG_PATH";
/// Disables `.env` loading when set to `1` or `true`.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";

//! Client builder for constructing [`ElasticsearchClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing endpoint URLs
//! - Configuring the shared HTTP transport (timeouts, redirects, TLS verification)
//!
//! # What this module does NOT handle:
//! - Sending requests (handled by the dispatcher in `request.rs`)
//! - Health tracking (handled by [`ConnectionPool`])
//!
//! # Invariants
//! - Endpoint URLs are absolute http(s) URLs without a trailing slash
//! - An empty host list builds; every request then fails with `NoConnectionsConfigured`
//! - `skip_verify` only affects HTTPS endpoints; HTTP-only pools log a warning

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use crate::cancellation::CancellationToken;
use crate::client::ElasticsearchClient;
use crate::error::{ClientError, Result};
use crate::metrics::MetricsCollector;
use crate::pool::{ConnectionPool, Credentials};
use es_output_config::{
    OutputConfig,
    constants::{
        DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES,
        DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECS,
    },
};

/// Builder for creating a new [`ElasticsearchClient`].
///
/// # Example
///
/// ```rust,ignore
/// use es_output_client::ElasticsearchClient;
/// use secrecy::SecretString;
///
/// let client = ElasticsearchClient::builder()
///     .hosts(["https://es1:9243", "https://es2:9243"])
///     .basic_auth("elastic", SecretString::new("changeme".to_string().into()))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct ElasticsearchClientBuilder {
    hosts: Vec<String>,
    credentials: Option<Credentials>,
    skip_verify: bool,
    timeout: Duration,
    connect_timeout: Duration,
    max_retries: usize,
    retry_backoff: Duration,
    metrics: Option<MetricsCollector>,
    cancellation: Option<CancellationToken>,
}

impl Default for ElasticsearchClientBuilder {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            credentials: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            metrics: None,
            cancellation: None,
        }
    }
}

impl ElasticsearchClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cluster endpoints, e.g. `http://localhost:9200`.
    pub fn hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    /// Add one endpoint.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Send HTTP Basic credentials with every request.
    pub fn basic_auth(self, username: impl Into<String>, password: SecretString) -> Self {
        self.credentials(Credentials::new(username, password))
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this against clusters with self-signed certificates you control.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Per-call timeout covering connect and response read. Default is 30 seconds.
    ///
    /// An expired call counts as a transport failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// TCP connect timeout. Default is 10 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the number of attempts per logical request. Default is 3.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Pause between attempts. Default is no pause.
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the metrics collector for attempts, retries, errors and health transitions.
    pub fn metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Create a client builder from loaded configuration.
    ///
    /// A password without a username is never produced by the config loader;
    /// a username without a password sends an empty password.
    pub fn from_config(mut self, config: &OutputConfig) -> Self {
        self.hosts = config.connection.hosts.clone();
        self.credentials = config.auth.username.as_ref().map(|username| {
            Credentials::new(
                username.clone(),
                config
                    .auth
                    .password
                    .clone()
                    .unwrap_or_else(|| SecretString::new(String::new().into())),
            )
        });
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.connect_timeout = config.connection.connect_timeout;
        self.max_retries = config.connection.max_retries;
        self.retry_backoff = config.connection.retry_backoff;
        self
    }

    /// Validate one endpoint and strip trailing slashes.
    ///
    /// - `"http://localhost:9200/"` -> `"http://localhost:9200"`
    /// - `"https://es.example.com:9243"` -> unchanged
    pub(crate) fn normalize_host(raw: &str) -> Result<String> {
        let trimmed = raw.trim();
        let parsed = url::Url::parse(trimmed)
            .map_err(|e| ClientError::InvalidUrl(format!("{trimmed}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ClientError::InvalidUrl(format!(
                "{trimmed}: expected an http(s) URL with a host"
            )));
        }

        Ok(trimmed.trim_end_matches('/').to_string())
    }

    /// Build the [`ElasticsearchClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if any endpoint is malformed.
    /// Returns [`ClientError::HttpClient`] if the HTTP transport fails to build.
    pub fn build(self) -> Result<ElasticsearchClient> {
        let hosts = self
            .hosts
            .iter()
            .map(|h| Self::normalize_host(h))
            .collect::<Result<Vec<_>>>()?;

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if hosts.iter().any(|h| h.starts_with("https://")) {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build().map_err(ClientError::HttpClient)?;

        if self.max_retries == 0 {
            tracing::warn!("max_retries is 0; every request will fail without being sent");
        }

        let pool = match &self.metrics {
            Some(m) => ConnectionPool::with_metrics(m.clone()),
            None => ConnectionPool::new(),
        };
        pool.set_connections(hosts, self.credentials);

        Ok(ElasticsearchClient {
            http,
            pool: Arc::new(pool),
            max_retries: self.max_retries,
            retry_backoff: self.retry_backoff,
            metrics: self.metrics,
            cancellation: self.cancellation,
        })
    }
}

//! Cluster client: connection pool, retrying dispatcher and document operations.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `request`: `request` / `perform_request`, the retrying dispatcher
//! - `documents`: index, delete, create-index, refresh and URI search
//!
//! # What this module does NOT handle:
//! - Endpoint selection and health bookkeeping (delegated to [`crate::pool`])
//! - Path building and response decoding (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - Clones share one connection pool and one HTTP transport.
//! - `max_retries` of 0 makes every request fail without being sent.

pub mod builder;
mod documents;
mod request;

use std::sync::Arc;
use std::time::Duration;

use crate::cancellation::CancellationToken;
use crate::error::Result;
use crate::metrics::MetricsCollector;
use crate::pool::{ConnectionPool, Credentials};

/// Client for one cluster.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use es_output_client::ElasticsearchClient;
///
/// # fn main() -> es_output_client::Result<()> {
/// let client = ElasticsearchClient::builder()
///     .hosts(["http://es1:9200", "http://es2:9200"])
///     .max_retries(3)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    pub(crate) http: reqwest::Client,
    pub(crate) pool: Arc<ConnectionPool>,
    pub(crate) max_retries: usize,
    pub(crate) retry_backoff: Duration,
    pub(crate) metrics: Option<MetricsCollector>,
    pub(crate) cancellation: Option<CancellationToken>,
}

impl ElasticsearchClient {
    /// Create a new client builder.
    pub fn builder() -> builder::ElasticsearchClientBuilder {
        builder::ElasticsearchClientBuilder::new()
    }

    /// Create a client for `urls` with default settings (3 attempts per request).
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::InvalidUrl`] if any URL is not an absolute http(s) URL.
    pub fn new<I, S>(urls: I, credentials: Option<Credentials>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::builder().hosts(urls);
        if let Some(credentials) = credentials {
            builder = builder.credentials(credentials);
        }
        builder.build()
    }

    /// Replace the endpoints used by this client and all of its clones.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::InvalidUrl`] if any URL is not an absolute
    /// http(s) URL. The current set is left untouched in that case.
    pub fn set_connections<I, S>(&self, urls: I, credentials: Option<Credentials>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts = urls
            .into_iter()
            .map(|url| builder::ElasticsearchClientBuilder::normalize_host(&url.into()))
            .collect::<Result<Vec<_>>>()?;
        self.pool.set_connections(hosts, credentials);
        Ok(())
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Set the number of attempts per logical request.
    pub fn set_max_retries(&mut self, retries: usize) {
        if retries == 0 {
            tracing::warn!("max_retries set to 0; every request will fail without being sent");
        }
        self.max_retries = retries;
    }

    /// Attach a cancellation token checked before and during every attempt.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

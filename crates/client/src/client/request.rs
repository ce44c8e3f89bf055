//! Retrying request dispatch across the connection pool.
//!
//! Responsibilities:
//! - Run one logical request as up to `max_retries` sequential attempts.
//! - Classify each attempt's outcome and feed it back into the pool.
//!
//! Does NOT handle:
//! - Interpreting response bodies (see `documents.rs` and [`crate::endpoints`]).
//!
//! Invariants:
//! - The body is serialized once, before the first attempt; failure is fatal.
//! - Pool configuration errors and malformed URLs abort without retrying.
//! - Each completed attempt updates exactly one connection's health exactly once.
//! - A cancelled attempt leaves connection health untouched.
//! - Status > 499 and transport failures mark dead; anything else marks live and
//!   returns the body as-is.
//! - Metrics are labeled by operation name, never by the request path.

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Instant;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::client::ElasticsearchClient;
use crate::endpoints::url_encode;
use crate::error::{ClientError, Result};
use crate::metrics::OP_REQUEST;
use crate::pool::Connection;

impl ElasticsearchClient {
    /// Send one logical request, retrying on other connections after node failures.
    ///
    /// The target of each attempt is the selected connection's URL followed by
    /// `path` and the encoded `params`. Responses below 500 are returned as
    /// raw bytes whatever their status.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NoConnectionsConfigured`] if the pool is empty
    /// - [`ClientError::Serialization`] if `body` cannot be encoded
    /// - [`ClientError::InvalidUrl`] if connection URL and path do not form a URL
    /// - [`ClientError::Cancelled`] if the cancellation token fires
    /// - [`ClientError::RetriesExhausted`] after `max_retries` failed attempts
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        params: Option<&BTreeMap<String, String>>,
        body: Option<&B>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        self.request_as(OP_REQUEST, method, path, params, body).await
    }

    /// [`request`](Self::request) with `operation` as the metrics label.
    pub(crate) async fn request_as<B>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        params: Option<&BTreeMap<String, String>>,
        body: Option<&B>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let result = self.dispatch(operation, &method, path, params, body).await;

        if let Err(ref e) = result
            && !matches!(e, ClientError::RetriesExhausted { .. })
            && let Some(ref m) = self.metrics
        {
            m.record_client_error(operation, method.as_str(), e);
        }

        result
    }

    async fn dispatch<B>(
        &self,
        operation: &'static str,
        method: &Method,
        path: &str,
        params: Option<&BTreeMap<String, String>>,
        body: Option<&B>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let payload = match body {
            Some(body) => Some(serde_json::to_vec(body).map_err(ClientError::Serialization)?),
            None => None,
        };
        let query = params.filter(|p| !p.is_empty()).map(url_encode);

        let mut last_error: Option<ClientError> = None;

        for attempt in 1..=self.max_retries {
            self.check_cancelled()?;

            if attempt > 1 {
                if let Some(ref m) = self.metrics {
                    m.record_retry(operation, method.as_str(), attempt);
                }
                if !self.retry_backoff.is_zero() {
                    let backoff = self.retry_backoff;
                    self.cancellable(async {
                        tokio::time::sleep(backoff).await;
                        Ok(())
                    })
                    .await?;
                }
            }

            let conn = self.pool.get_connection()?;
            let url = request_url(conn.url(), path, query.as_deref())?;

            debug!(
                attempt,
                max_retries = self.max_retries,
                method = %method,
                url = %url,
                "Sending request"
            );

            match self
                .cancellable(self.attempt(operation, &conn, method.clone(), url, payload.clone()))
                .await
            {
                Ok(body) => {
                    if attempt > 1 {
                        debug!(attempt, "Request succeeded after retry");
                    }
                    return Ok(body);
                }
                Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
                Err(e) => {
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        connection = conn.url(),
                        error = %e,
                        "Request attempt failed"
                    );
                    if let Some(ref m) = self.metrics {
                        m.record_client_error(operation, method.as_str(), &e);
                    }
                    last_error = Some(e);
                }
            }
        }

        warn!(
            attempts = self.max_retries,
            method = %method,
            path,
            "Request fails to be sent after all retries"
        );
        Err(ClientError::RetriesExhausted {
            attempts: self.max_retries,
            last: last_error.map(Box::new),
        })
    }

    /// Send a single attempt to `conn` and record its outcome in the pool.
    ///
    /// Adds `Accept: application/json` and, when the connection has
    /// credentials, HTTP Basic authentication.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Transport`] on connect, timeout or body-read failure
    /// - [`ClientError::ServerError`] on a status above 499
    pub async fn perform_request(
        &self,
        conn: &Connection,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        self.attempt(OP_REQUEST, conn, method, url, body).await
    }

    async fn attempt(
        &self,
        operation: &'static str,
        conn: &Connection,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let method_label = method.as_str().to_string();
        if let Some(ref m) = self.metrics {
            m.record_request(operation, &method_label);
        }

        let mut builder = self
            .http
            .request(method, url.clone())
            .header(ACCEPT, "application/json");
        if let Some(creds) = conn.credentials() {
            builder = builder.basic_auth(&creds.username, Some(creds.password.expose_secret()));
        }
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let start = Instant::now();
        let record_duration = |status: Option<u16>| {
            if let Some(ref m) = self.metrics {
                m.record_request_duration(operation, &method_label, start.elapsed(), status);
            }
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(source) => {
                record_duration(None);
                self.pool.mark_dead(conn);
                return Err(ClientError::Transport {
                    url: url.to_string(),
                    source,
                });
            }
        };

        let status = response.status().as_u16();
        record_duration(Some(status));

        if ClientError::is_unhealthy_status(status) {
            let message = response.text().await.unwrap_or_default();
            self.pool.mark_dead(conn);
            return Err(ClientError::ServerError {
                status,
                url: url.to_string(),
                message,
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                self.pool.mark_live(conn);
                Ok(bytes.to_vec())
            }
            Err(source) => {
                self.pool.mark_dead(conn);
                Err(ClientError::Transport {
                    url: url.to_string(),
                    source,
                })
            }
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        match self.cancellation {
            Some(ref token) if token.is_cancelled() => Err(ClientError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Race `fut` against the cancellation token, if any.
    async fn cancellable<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.cancellation {
            Some(ref token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ClientError::Cancelled),
                result = fut => result,
            },
            None => fut.await,
        }
    }
}

/// Join a connection URL, a path and an encoded query string.
fn request_url(base: &str, path: &str, query: Option<&str>) -> Result<Url> {
    let mut target = format!("{base}{path}");
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }
    Url::parse(&target).map_err(|e| ClientError::InvalidUrl(format!("{target}: {e}")))
}

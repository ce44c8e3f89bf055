//! Error types for the Elasticsearch output client.
//!
//! Responsibilities:
//! - Classify every failure a logical request can end with.
//! - Tell transient failures (retried across connections) from fatal ones.
//!
//! Invariants:
//! - Responses below 500 are never errors here; their bodies are returned to the caller.
//! - `Decode` is only produced after a successful network exchange.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The pool has no connections to choose from.
    #[error("No connections configured")]
    NoConnectionsConfigured,

    /// Connect, timeout, DNS or body-read failure against one node.
    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The node answered with a status of 500 or above.
    #[error("Server error ({status}) at {url}: {message}")]
    ServerError {
        status: u16,
        url: String,
        message: String,
    },

    /// The request body could not be encoded.
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body did not match the expected shape.
    #[error("Failed to decode {target}: {source}")]
    Decode {
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Every attempt of a logical request failed.
    #[error("Request fails to be sent after {attempts} retries{}", .last.as_ref().map(|e| format!(": {e}")).unwrap_or_default())]
    RetriesExhausted {
        attempts: usize,
        last: Option<Box<ClientError>>,
    },

    /// A connection URL and path do not form a valid request target.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The shared HTTP transport could not be created.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl ClientError {
    /// True for failures that mark a connection dead and are retried on another node.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::ServerError { .. })
    }

    /// HTTP status carried by the error, if the node answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            Self::RetriesExhausted { last: Some(last), .. } => last.status(),
            _ => None,
        }
    }

    /// Check if an HTTP status marks the answering node unhealthy.
    ///
    /// Anything above 499 is a node failure; 4xx answers are application outcomes.
    pub fn is_unhealthy_status(status: u16) -> bool {
        status > 499
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_error_is_transient() {
        let err = ClientError::ServerError {
            status: 503,
            url: "http://es1:9200/logs".to_string(),
            message: "unavailable".to_string(),
        };
        assert!(err.is_transient());

        assert!(!ClientError::NoConnectionsConfigured.is_transient());
        assert!(!ClientError::Cancelled.is_transient());
        assert!(!ClientError::Serialization(decode_error()).is_transient());
        assert!(
            !ClientError::Decode {
                target: "QueryResult",
                source: decode_error(),
            }
            .is_transient()
        );
    }

    #[test]
    fn test_unhealthy_status_boundary() {
        assert!(!ClientError::is_unhealthy_status(404));
        assert!(!ClientError::is_unhealthy_status(499));
        assert!(ClientError::is_unhealthy_status(500));
        assert!(ClientError::is_unhealthy_status(503));
    }

    #[test]
    fn test_retries_exhausted_names_count() {
        let err = ClientError::RetriesExhausted {
            attempts: 3,
            last: None,
        };
        assert_eq!(err.to_string(), "Request fails to be sent after 3 retries");
    }

    #[test]
    fn test_retries_exhausted_includes_last_error() {
        let err = ClientError::RetriesExhausted {
            attempts: 2,
            last: Some(Box::new(ClientError::ServerError {
                status: 502,
                url: "http://es2:9200/".to_string(),
                message: "bad gateway".to_string(),
            })),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Request fails to be sent after 2 retries: "));
        assert!(msg.contains("502"));
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_status_absent_for_fatal_errors() {
        assert_eq!(ClientError::NoConnectionsConfigured.status(), None);
        assert_eq!(ClientError::InvalidUrl("x".to_string()).status(), None);
    }
}

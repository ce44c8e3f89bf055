//! Metrics collection for cluster requests.
//!
//! This module provides metrics collection for requests sent to the cluster, including:
//! - Attempt latency histograms
//! - Attempt, retry and error counters
//! - Connection health transitions
//!
//! # What this module does NOT handle:
//! - Metrics exposition/export (install a `metrics` recorder in the host process)
//! - Alerting or threshold monitoring
//!
//! # Invariants
//! - All metrics use consistent label names: `operation`, `method`, `status`, `error_category`
//! - `operation` is one of the `OP_*` names; paths and document ids never become labels
//! - Metric recording is infallible and never disrupts a request
//! - Zero-cost when no metrics recorder is installed

use crate::error::ClientError;
use crate::pool::HealthStatus;
use std::time::Duration;

/// Metric name for attempt duration histogram.
pub const METRIC_REQUEST_DURATION: &str = "es_output_request_duration_seconds";

/// Metric name for attempt counter.
pub const METRIC_REQUESTS_TOTAL: &str = "es_output_requests_total";

/// Metric name for retry counter.
pub const METRIC_RETRIES_TOTAL: &str = "es_output_retries_total";

/// Metric name for error counter.
pub const METRIC_ERRORS_TOTAL: &str = "es_output_errors_total";

/// Metric name for connection health transitions.
pub const METRIC_HEALTH_TRANSITIONS: &str = "es_output_connection_health_transitions_total";

/// Operation label for raw `request` / `perform_request` calls.
pub const OP_REQUEST: &str = "request";
pub const OP_INDEX: &str = "index";
pub const OP_DELETE: &str = "delete";
pub const OP_CREATE_INDEX: &str = "create_index";
pub const OP_REFRESH: &str = "refresh";
pub const OP_SEARCH: &str = "search";

/// Error categories for metrics labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connect, DNS, timeout or body-read failures
    Transport,
    /// HTTP 5xx answers
    Http5xx,
    /// Request body encoding failures
    Serialization,
    /// Response body decoding failures
    Decode,
    /// Empty pool or malformed endpoint URL
    Configuration,
    /// Cancelled by the caller
    Cancelled,
    /// Unknown/unclassified errors
    Unknown,
}

impl ErrorCategory {
    /// Returns the string label for this error category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Serialization => "serialization",
            ErrorCategory::Decode => "decode",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::Transport { .. } => ErrorCategory::Transport,
            ClientError::ServerError { .. } => ErrorCategory::Http5xx,
            ClientError::Serialization(_) => ErrorCategory::Serialization,
            ClientError::Decode { .. } => ErrorCategory::Decode,
            ClientError::NoConnectionsConfigured | ClientError::InvalidUrl(_) => {
                ErrorCategory::Configuration
            }
            ClientError::Cancelled => ErrorCategory::Cancelled,
            ClientError::RetriesExhausted {
                last: Some(inner), ..
            } => ErrorCategory::from(inner.as_ref()),
            ClientError::RetriesExhausted { last: None, .. } | ClientError::HttpClient(_) => {
                ErrorCategory::Unknown
            }
        }
    }
}

/// Metrics collector for cluster requests.
///
/// A lightweight wrapper around the `metrics` crate macros with consistent labels.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    /// Create an enabled collector.
    pub fn new() -> Self {
        Self { enabled: true }
    }

    /// Create a collector that records nothing.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record the duration of one attempt.
    ///
    /// `status` is `None` when no response was received.
    pub fn record_request_duration(
        &self,
        operation: &str,
        method: &str,
        duration: Duration,
        status: Option<u16>,
    ) {
        if !self.enabled {
            return;
        }

        let status_label = status.map_or("error".to_string(), |s| s.to_string());

        metrics::histogram!(METRIC_REQUEST_DURATION,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
            "status" => status_label,
        )
        .record(duration.as_secs_f64());
    }

    /// Record one attempt, including retries.
    pub fn record_request(&self, operation: &str, method: &str) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record a retry. `attempt` is the 1-based number of the attempt being started.
    pub fn record_retry(&self, operation: &str, method: &str, attempt: usize) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_RETRIES_TOTAL,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
            "attempt" => attempt.to_string(),
        )
        .increment(1);
    }

    pub fn record_error(&self, operation: &str, method: &str, category: ErrorCategory) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_ERRORS_TOTAL,
            "operation" => operation.to_string(),
            "method" => method.to_string(),
            "error_category" => category.as_str(),
        )
        .increment(1);
    }

    /// Record an error, categorizing it automatically.
    pub fn record_client_error(&self, operation: &str, method: &str, error: &ClientError) {
        self.record_error(operation, method, ErrorCategory::from(error));
    }

    /// Record a connection moving to `status`.
    pub fn record_health_transition(&self, status: HealthStatus) {
        if !self.enabled {
            return;
        }

        metrics::counter!(METRIC_HEALTH_TRANSITIONS,
            "to" => status.as_str(),
        )
        .increment(1);
    }
}

//! Resilient Elasticsearch output client.
//!
//! Ships documents to a cluster over HTTP while tolerating node failures:
//! a health-tracking [`ConnectionPool`] picks the node for each attempt, the
//! dispatcher ([`ElasticsearchClient::request`]) retries across nodes up to a
//! bound, and the document operations build paths and decode typed results.

mod cancellation;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pool;
mod serde_helpers;

pub use cancellation::CancellationToken;
pub use client::ElasticsearchClient;
pub use client::builder::ElasticsearchClientBuilder;
pub use endpoints::{make_path, url_encode};
pub use error::{ClientError, Result};
pub use metrics::{ErrorCategory, MetricsCollector};
pub use models::{Hits, QueryResult, SearchResults};
pub use pool::{Connection, ConnectionHealth, ConnectionPool, Credentials, HealthStatus};
pub use reqwest::Method;

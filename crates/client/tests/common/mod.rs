//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Every mock node is an independent `MockServer`.
//! - A "dead" node is a local port with nothing listening.
//!
//! # What this does NOT handle
//! - Mock setup for specific endpoints (use wiremock directly in tests)

use std::net::TcpListener;
use std::time::Duration;

#[allow(unused_imports)]
pub use es_output_client::{ClientError, ElasticsearchClient, HealthStatus};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// URL of a local port that refuses connections.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Client over `urls` with a short timeout and `max_retries` attempts per request.
#[allow(dead_code)]
pub fn client_for(urls: &[String], max_retries: usize) -> ElasticsearchClient {
    ElasticsearchClient::builder()
        .hosts(urls.iter().cloned())
        .max_retries(max_retries)
        .timeout(Duration::from_secs(5))
        .connect_timeout(Duration::from_secs(2))
        .build()
        .expect("client should build")
}

/// A typical acknowledgement for an indexed document.
#[allow(dead_code)]
pub fn index_ack(index: &str, doc_type: &str, id: &str) -> serde_json::Value {
    serde_json::json!({
        "_index": index,
        "_type": doc_type,
        "_id": id,
        "_version": 1,
        "result": "created",
        "created": true
    })
}

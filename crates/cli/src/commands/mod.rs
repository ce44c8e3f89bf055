//! Command handlers.
//!
//! Each handler receives a ready client and writes its results to stdout;
//! diagnostics go to stderr through `tracing`.

pub mod delete;
pub mod index;
pub mod indices;
pub mod search;

use anyhow::{Context, Result};
use es_output_client::{CancellationToken, ElasticsearchClient};
use es_output_config::OutputConfig;

/// Build the client for one CLI invocation.
pub fn build_client(config: &OutputConfig, cancel: &CancellationToken) -> Result<ElasticsearchClient> {
    ElasticsearchClient::builder()
        .from_config(config)
        .cancellation(cancel.clone())
        .build()
        .context("Failed to create client")
}

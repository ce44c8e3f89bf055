//! Index-level commands: create and refresh.

use anyhow::{Context, Result};
use es_output_client::ElasticsearchClient;
use tracing::info;

pub async fn create(client: &ElasticsearchClient, index: &str) -> Result<()> {
    info!(index, "Creating index");

    let result = client
        .create_index(index)
        .await
        .with_context(|| format!("Failed to create index {index}"))?;

    println!("{result}");
    Ok(())
}

pub async fn refresh(client: &ElasticsearchClient, index: &str) -> Result<()> {
    client
        .refresh(index)
        .await
        .with_context(|| format!("Failed to refresh {index}"))?;

    println!("Refreshed {index}");
    Ok(())
}

//! Delete command implementation.

use anyhow::{Context, Result};
use es_output_client::{ElasticsearchClient, QueryResult};
use tracing::info;

use crate::error::CliError;

pub async fn run(client: &ElasticsearchClient, index: &str, doc_type: &str, id: &str) -> Result<()> {
    info!(index, id, "Deleting document");

    let result = client
        .delete(index, doc_type, id, None)
        .await
        .with_context(|| format!("Failed to delete {id} from {index}"))?;

    if !deleted(&result) {
        return Err(CliError::NotFound {
            index: index.to_string(),
            id: id.to_string(),
        }
        .into());
    }

    println!("{result}");
    Ok(())
}

/// Servers from 6.0 on report `"result":"deleted"` and omit `found`.
fn deleted(result: &QueryResult) -> bool {
    result.found || result.result.as_deref() == Some("deleted")
}

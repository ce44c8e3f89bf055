//! Index command: ship newline-delimited JSON documents.
//!
//! Responsibilities:
//! - Read NDJSON from a file or stdin, one document per non-blank line.
//! - Index each document, optionally taking its id from a top-level field.
//!
//! Invariants:
//! - Documents are sent in input order, one request each.
//! - A line that is not valid JSON stops the run before anything after it is sent.
//! - Rejected documents (answered below 500 without an id) are counted, not fatal.

use anyhow::{Context, Result};
use es_output_client::{ElasticsearchClient, QueryResult};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::error::CliError;

pub struct IndexOptions<'a> {
    pub index: &'a str,
    pub doc_type: &'a str,
    pub id_field: Option<&'a str>,
    pub refresh: bool,
}

pub async fn run(client: &ElasticsearchClient, input: &str, opts: IndexOptions<'_>) -> Result<()> {
    let summary = if input == "-" {
        ship(client, BufReader::new(tokio::io::stdin()), &opts).await?
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .with_context(|| format!("Failed to open {input}"))?;
        ship(client, BufReader::new(file), &opts).await?
    };

    if opts.refresh && summary.indexed > 0 {
        client
            .refresh(opts.index)
            .await
            .with_context(|| format!("Failed to refresh {}", opts.index))?;
    }

    println!("Indexed {} documents into {}", summary.indexed, opts.index);

    if summary.rejected > 0 {
        return Err(CliError::Rejected {
            rejected: summary.rejected,
            total: summary.indexed + summary.rejected,
        }
        .into());
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    indexed: usize,
    rejected: usize,
}

async fn ship<R>(client: &ElasticsearchClient, reader: R, opts: &IndexOptions<'_>) -> Result<Summary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = Summary::default();
    let mut line_no = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_no += 1;
        if line.trim().is_empty() {
            continue;
        }

        let doc: Value = serde_json::from_str(&line).map_err(|source| CliError::InvalidInput {
            line: line_no,
            source,
        })?;
        let id = opts.id_field.and_then(|field| document_id(&doc, field)).unwrap_or_default();

        let result = client
            .index(opts.index, opts.doc_type, &id, None, &doc)
            .await
            .with_context(|| format!("Failed to index line {line_no}"))?;

        if accepted(&result) {
            summary.indexed += 1;
        } else {
            warn!(line = line_no, response = %result, "Document rejected");
            summary.rejected += 1;
        }
    }

    info!(
        indexed = summary.indexed,
        rejected = summary.rejected,
        index = opts.index,
        "Finished shipping documents"
    );
    Ok(summary)
}

/// String form of `doc[field]` for use as a document id.
fn document_id(doc: &Value, field: &str) -> Option<String> {
    match doc.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn accepted(result: &QueryResult) -> bool {
    !result.id.is_empty()
}

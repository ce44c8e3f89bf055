//! Search command implementation.
//!
//! Responsibilities:
//! - Translate CLI options into URI-search parameters (`q`, `size`, `sort`).
//! - Print the response as pretty JSON or one `_source` per line.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use es_output_client::{ElasticsearchClient, SearchResults};
use tracing::info;

use crate::args::SearchOutput;

pub struct SearchOptions<'a> {
    pub index: &'a str,
    pub doc_type: &'a str,
    pub size: Option<usize>,
    pub sort: Option<&'a str>,
    pub output: SearchOutput,
}

pub async fn run(client: &ElasticsearchClient, query: &str, opts: SearchOptions<'_>) -> Result<()> {
    info!(index = opts.index, query, "Searching");

    let params = search_params(query, opts.size, opts.sort);
    let results = client
        .search_uri(opts.index, opts.doc_type, Some(&params))
        .await
        .with_context(|| format!("Failed to search {}", opts.index))?;

    print!("{}", render(&results, opts.output)?);
    Ok(())
}

fn search_params(query: &str, size: Option<usize>, sort: Option<&str>) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert("q".to_string(), query.to_string());
    if let Some(size) = size {
        params.insert("size".to_string(), size.to_string());
    }
    if let Some(sort) = sort {
        params.insert("sort".to_string(), sort.to_string());
    }
    params
}

fn render(results: &SearchResults, output: SearchOutput) -> Result<String> {
    match output {
        SearchOutput::Json => Ok(format!("{}\n", serde_json::to_string_pretty(results)?)),
        SearchOutput::Ndjson => {
            let mut out = String::new();
            for hit in &results.hits.hits {
                let source = hit.get("_source").unwrap_or(hit);
                out.push_str(&serde_json::to_string(source)?);
                out.push('\n');
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_params() {
        let params = search_params("status:404", Some(10), None);
        assert_eq!(params.get("q").map(String::as_str), Some("status:404"));
        assert_eq!(params.get("size").map(String::as_str), Some("10"));
        assert!(!params.contains_key("sort"));
    }

    #[test]
    fn test_render_ndjson_prefers_source() {
        let results: SearchResults = serde_json::from_value(json!({
            "hits": {"total": 2, "hits": [
                {"_id": "1", "_source": {"status": 200}},
                {"_id": "2"}
            ]}
        }))
        .unwrap();

        let out = render(&results, SearchOutput::Ndjson).unwrap();
        assert_eq!(out, "{\"status\":200}\n{\"_id\":\"2\"}\n");
    }

    #[test]
    fn test_render_json_is_pretty() {
        let out = render(&SearchResults::default(), SearchOutput::Json).unwrap();
        assert!(out.contains("\n  \"took\": 0"));
    }
}

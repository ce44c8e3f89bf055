//! Search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::total_hits;

/// Decoded URI-search response. Hits and aggregations stay raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    /// Server-side time in milliseconds.
    pub took: u64,
    pub timed_out: bool,
    #[serde(rename = "_shards")]
    pub shards: Value,
    pub hits: Hits,
    #[serde(rename = "aggregations")]
    pub aggs: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hits {
    #[serde(deserialize_with = "total_hits")]
    pub total: u64,
    pub max_score: Option<f64>,
    pub hits: Vec<Value>,
}

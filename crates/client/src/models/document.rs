//! Single-document operation results.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::string_from_number_or_string;

/// Acknowledgement returned by index, delete, create-index and refresh calls.
///
/// Every field defaults when absent, so any JSON object decodes. Which fields
/// are set depends on the operation and the server version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResult {
    pub ok: bool,
    /// Set by index-level operations on newer servers.
    pub acknowledged: bool,
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub doc_type: String,
    #[serde(rename = "_id", deserialize_with = "string_from_number_or_string")]
    pub id: String,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(rename = "_version")]
    pub version: i64,
    pub found: bool,
    pub exists: bool,
    pub created: bool,
    /// `created`, `updated`, `deleted`, `not_found` or `noop` on newer servers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub matches: Vec<String>,
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("ERROR"),
        }
    }
}

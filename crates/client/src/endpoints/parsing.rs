//! Decoding of response bodies into typed results.

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::models::{QueryResult, SearchResults};

fn decode<T: DeserializeOwned>(body: &[u8], target: &'static str) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| ClientError::Decode { target, source })
}

/// Decode a single-document acknowledgement.
pub fn read_query_result(body: &[u8]) -> Result<QueryResult> {
    decode(body, "QueryResult")
}

/// Decode a search response.
pub fn read_search_result(body: &[u8]) -> Result<SearchResults> {
    decode(body, "SearchResults")
}

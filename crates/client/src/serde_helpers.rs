//! Serde helpers for loosely typed cluster responses.
//!
//! Responsibilities:
//! - Accept the numeric and object forms of `hits.total` used by different server versions.
//! - Accept document ids that arrive as JSON numbers.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics.
//!
//! Invariants / assumptions:
//! - Older servers send `"total": 12`, newer ones `"total": {"value": 12, "relation": "eq"}`.

use serde::Deserialize;
use serde::de::Error as _;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Count(u64),
    Object { value: u64 },
    String(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
}

/// Deserialize `hits.total` from either a number or a `{value, relation}` object.
pub fn total_hits<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<TotalHits>::deserialize(deserializer)? {
        None => Ok(0),
        Some(TotalHits::Count(v)) => Ok(v),
        Some(TotalHits::Object { value }) => Ok(value),
        Some(TotalHits::String(s)) => s.parse::<u64>().map_err(D::Error::custom),
    }
}

/// Deserialize a string that may arrive as a JSON number.
pub fn string_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(StringOrNumber::String(s)) => Ok(s),
        Some(StringOrNumber::U64(v)) => Ok(v.to_string()),
        Some(StringOrNumber::I64(v)) => Ok(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Total {
        #[serde(deserialize_with = "total_hits")]
        total: u64,
    }

    #[derive(Debug, Deserialize)]
    struct Id {
        #[serde(deserialize_with = "string_from_number_or_string")]
        id: String,
    }

    #[test]
    fn test_total_hits_forms() {
        let t: Total = serde_json::from_str(r#"{"total": 7}"#).unwrap();
        assert_eq!(t.total, 7);

        let t: Total =
            serde_json::from_str(r#"{"total": {"value": 10000, "relation": "gte"}}"#).unwrap();
        assert_eq!(t.total, 10000);

        let t: Total = serde_json::from_str(r#"{"total": "3"}"#).unwrap();
        assert_eq!(t.total, 3);

        let t: Total = serde_json::from_str(r#"{"total": null}"#).unwrap();
        assert_eq!(t.total, 0);
    }

    #[test]
    fn test_total_hits_rejects_garbage() {
        assert!(serde_json::from_str::<Total>(r#"{"total": "many"}"#).is_err());
        assert!(serde_json::from_str::<Total>(r#"{"total": [1]}"#).is_err());
    }

    #[test]
    fn test_string_from_number_or_string() {
        let id: Id = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(id.id, "abc");
        let id: Id = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(id.id, "42");
        let id: Id = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(id.id, "");
    }
}

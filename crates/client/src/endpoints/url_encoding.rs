//! URL encoding for request paths and query strings.
//!
//! Path segments are percent-encoded so that index, type and id names cannot
//! change the structure of the request path:
//! - `/` would create a nested path
//! - `?` and `#` would start a query or fragment
//! - `%` would be decoded a second time by the server
//!
//! Commas are left alone because they separate index names in multi-index
//! targets (`logs-a,logs-b/_search`).
//!
//! # Example
//!
//! ```
//! use es_output_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("logs/2024"), "logs%2F2024");
//! ```

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in path segments.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for use as one path segment.
///
/// ```
/// use es_output_client::endpoints::url_encoding::encode_path_segment;
///
/// assert_eq!(encode_path_segment("logs"), "logs");
/// assert_eq!(encode_path_segment("_refresh"), "_refresh");
/// assert_eq!(encode_path_segment("my doc"), "my%20doc");
/// assert_eq!(encode_path_segment("logs-a,logs-b"), "logs-a,logs-b");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

/// Encode query parameters as `application/x-www-form-urlencoded`.
///
/// Keys come out in sorted order. Returns an empty string for an empty map.
///
/// ```
/// use std::collections::BTreeMap;
/// use es_output_client::endpoints::url_encoding::url_encode;
///
/// let mut params = BTreeMap::new();
/// params.insert("q".to_string(), "status:200 AND verb:GET".to_string());
/// params.insert("size".to_string(), "10".to_string());
/// assert_eq!(url_encode(&params), "q=status%3A200+AND+verb%3AGET&size=10");
/// ```
pub fn url_encode(params: &BTreeMap<String, String>) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

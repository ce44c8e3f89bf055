//! Request path construction for document operations.

use super::url_encoding::encode_path_segment;

/// Build the request path for an index, mapping type and document id.
///
/// | index     | type      | id        | path              |
/// |-----------|-----------|-----------|-------------------|
/// | any       | non-empty | non-empty | `/index/type/id`  |
/// | any       | non-empty | empty     | `/index/type`     |
/// | non-empty | empty     | non-empty | `/index/id`       |
/// | empty     | empty     | non-empty | `/id`             |
/// | any       | empty     | empty     | `/index`          |
///
/// A type takes priority over an id given without a type. Each segment is
/// percent-encoded.
///
/// ```
/// use es_output_client::endpoints::make_path;
///
/// assert_eq!(make_path("logs", "event", ""), "/logs/event");
/// assert_eq!(make_path("logs", "", "42"), "/logs/42");
/// assert_eq!(make_path("", "", "42"), "/42");
/// assert_eq!(make_path("logs", "", "_refresh"), "/logs/_refresh");
/// ```
pub fn make_path(index: &str, doc_type: &str, id: &str) -> String {
    let index = encode_path_segment(index);

    if !doc_type.is_empty() {
        let doc_type = encode_path_segment(doc_type);
        if id.is_empty() {
            return format!("/{index}/{doc_type}");
        }
        return format!("/{index}/{doc_type}/{}", encode_path_segment(id));
    }

    if !id.is_empty() {
        let id = encode_path_segment(id);
        if index.is_empty() {
            return format!("/{id}");
        }
        return format!("/{index}/{id}");
    }

    format!("/{index}")
}

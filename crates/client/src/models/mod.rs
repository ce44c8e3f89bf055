//! Response shapes for document and search operations.
//!
//! These types are pass-through data: the client decodes them but never acts
//! on their content.

pub mod document;
pub mod search;

pub use document::QueryResult;
pub use search::{Hits, SearchResults};

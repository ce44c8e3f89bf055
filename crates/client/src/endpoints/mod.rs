//! Path building, query encoding and response decoding for cluster requests.

mod parsing;
mod path;
pub mod url_encoding;

pub use parsing::{read_query_result, read_search_result};
pub use path::make_path;
pub use url_encoding::url_encode;

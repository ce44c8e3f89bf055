//! Document operations built on the dispatcher.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use crate::client::ElasticsearchClient;
use crate::endpoints::{make_path, read_query_result, read_search_result};
use crate::error::Result;
use crate::metrics::{OP_CREATE_INDEX, OP_DELETE, OP_INDEX, OP_REFRESH, OP_SEARCH};
use crate::models::{QueryResult, SearchResults};

/// Placeholder body type for requests without a body.
type NoBody = ();

impl ElasticsearchClient {
    /// Index a document.
    ///
    /// Uses `POST` when `id` is empty (the server assigns an id) and `PUT`
    /// otherwise.
    pub async fn index<B>(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        params: Option<&BTreeMap<String, String>>,
        body: &B,
    ) -> Result<QueryResult>
    where
        B: Serialize + ?Sized,
    {
        let method = if id.is_empty() { Method::POST } else { Method::PUT };
        let path = make_path(index, doc_type, id);
        debug!(%method, %path, "Indexing document");

        let response = self
            .request_as(OP_INDEX, method.clone(), &path, params, Some(body))
            .await?;
        self.decoded(OP_INDEX, &method, read_query_result(&response))
    }

    /// Delete a document. A missing document is reported in the result, not as an error.
    pub async fn delete(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        params: Option<&BTreeMap<String, String>>,
    ) -> Result<QueryResult> {
        let path = make_path(index, doc_type, id);
        debug!(%path, "Deleting document");

        let response = self
            .request_as(OP_DELETE, Method::DELETE, &path, params, None::<&NoBody>)
            .await?;
        self.decoded(OP_DELETE, &Method::DELETE, read_query_result(&response))
    }

    /// Create an index with default settings.
    pub async fn create_index(&self, index: &str) -> Result<QueryResult> {
        let path = make_path(index, "", "");
        debug!(%path, "Creating index");

        let response = self
            .request_as(OP_CREATE_INDEX, Method::PUT, &path, None, None::<&NoBody>)
            .await?;
        self.decoded(OP_CREATE_INDEX, &Method::PUT, read_query_result(&response))
    }

    /// Make recent writes to `index` visible to search.
    pub async fn refresh(&self, index: &str) -> Result<QueryResult> {
        let path = make_path(index, "", "_refresh");

        let response = self
            .request_as(OP_REFRESH, Method::POST, &path, None, None::<&NoBody>)
            .await?;
        self.decoded(OP_REFRESH, &Method::POST, read_query_result(&response))
    }

    /// Run a URI search; `params` carries the query (`q`, `size`, `sort`, ...).
    pub async fn search_uri(
        &self,
        index: &str,
        doc_type: &str,
        params: Option<&BTreeMap<String, String>>,
    ) -> Result<SearchResults> {
        let path = make_path(index, doc_type, "_search");
        debug!(%path, "Searching");

        let response = self
            .request_as(OP_SEARCH, Method::GET, &path, params, None::<&NoBody>)
            .await?;
        self.decoded(OP_SEARCH, &Method::GET, read_search_result(&response))
    }

    fn decoded<T>(&self, operation: &str, method: &Method, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result
            && let Some(ref m) = self.metrics
        {
            m.record_client_error(operation, method.as_str(), e);
        }
        result
    }
}

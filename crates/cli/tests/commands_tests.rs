//! Delete, create-index, refresh and search commands against a mock node.

mod common;

use common::es_cmd_with_host;
use predicates::prelude::*;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_delete_prints_result() {
    let node = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/logs/_doc/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_index": "logs", "_id": "42", "found": true, "result": "deleted"
        })))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .args(["delete", "42", "--index", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\":\"deleted\""));
}

#[tokio::test]
async fn test_delete_without_found_field_succeeds() {
    let node = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/logs/_doc/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_index": "logs", "_id": "42", "_version": 2, "result": "deleted",
            "_shards": {"total": 2, "successful": 1, "failed": 0}
        })))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .args(["delete", "42", "--index", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\":\"deleted\""));
}

#[tokio::test]
async fn test_delete_missing_document_exit_4() {
    let node = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "_index": "logs", "_id": "42", "found": false, "result": "not_found"
        })))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .args(["delete", "42", "--index", "logs"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Document 42 not found in logs"));
}

#[tokio::test]
async fn test_create_index() {
    let node = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "acknowledged": true
        })))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .args(["create-index", "--index", "metrics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"acknowledged\":true"));
}

#[tokio::test]
async fn test_refresh_with_credentials() {
    let node = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/logs/_refresh"))
        .and(basic_auth("elastic", "changeme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .env("ES_OUTPUT_USERNAME", "elastic")
        .env("ES_OUTPUT_PASSWORD", "changeme")
        .args(["refresh", "--index", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Refreshed logs"));
}

#[tokio::test]
async fn test_search_ndjson() {
    let node = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs/_search"))
        .and(query_param("q", "status:404"))
        .and(query_param("size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "took": 1,
            "hits": {"total": {"value": 2}, "hits": [
                {"_id": "1", "_source": {"status": 404, "path": "/a"}},
                {"_id": "2", "_source": {"status": 404, "path": "/b"}}
            ]}
        })))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .args(["search", "status:404", "--index", "logs", "--size", "2", "-o", "ndjson"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\":\"/a\""))
        .stdout(predicate::str::contains("\"path\":\"/b\""));
}

#[tokio::test]
async fn test_search_json_by_type() {
    let node = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logs/event/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "took": 4, "hits": {"total": 0, "hits": []}
        })))
        .expect(1)
        .mount(&node)
        .await;

    es_cmd_with_host(&node.uri())
        .args(["search", "*", "--index", "logs", "--doc-type", "event"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"took\": 4"));
}

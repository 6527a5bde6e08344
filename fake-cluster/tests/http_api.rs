//! Integration tests for the fake cluster HTTP API.
//!
//! Each test starts the real router on an ephemeral port and talks to it over
//! HTTP with reqwest.

use std::net::SocketAddr;

use fake_cluster::{create_app, serve, AppState, NodeIdentity, ServerConfig};
use fake_cluster_store::{EvictionPolicy, StoreConfig};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestServer {
    addr: SocketAddr,
    client: Client,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with(ServerConfig::default()).await
    }

    async fn start_with(config: ServerConfig) -> Self {
        let state = AppState::new(&config, NodeIdentity::from_seed(Some(42)));
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, app, std::future::pending()));

        Self {
            addr,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn request(&self, method: Method, path: &str, body: &str) -> (StatusCode, String) {
        let response = self
            .client
            .request(method, self.url(path))
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = response.status();
        let text = response.text().await.unwrap();
        (status, text)
    }

    async fn bulk(&self, path: &str, body: &str) -> (StatusCode, Value) {
        let (status, text) = self.request(Method::POST, path, body).await;
        (status, serde_json::from_str(&text).unwrap())
    }
}

fn ndjson(lines: &[&str]) -> String {
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

#[tokio::test]
async fn test_root_descriptor() {
    let server = TestServer::start().await;
    let expected = NodeIdentity::from_seed(Some(42));

    let (status, text) = server.request(Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["name"], expected.node_name.as_str());
    assert_eq!(body["cluster_name"], "fake-cluster");
    assert_eq!(body["cluster_uuid"], expected.cluster_uuid.as_str());
    assert_eq!(body["version"]["number"], "7.3.1");
}

#[tokio::test]
async fn test_root_rejects_post() {
    let server = TestServer::start().await;
    let (status, _) = server.request(Method::POST, "/", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_xpack_descriptor() {
    let server = TestServer::start().await;
    let (status, text) = server.request(Method::GET, "/_xpack", "").await;
    assert_eq!(status, StatusCode::OK);

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["features"]["ilm"]["enabled"], false);
}

#[tokio::test]
async fn test_bulk_against_collection() {
    let server = TestServer::start().await;
    let body = ndjson(&[
        r#"{"index":{}}"#,
        r#"{"a":1}"#,
        r#"{"delete":{"_index":"old"}}"#,
    ]);

    let (status, response) = server.bulk("/orders/_bulk", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            "errors": false,
            "items": [
                {"index": {"_index": "orders", "_type": "_doc", "result": "created", "status": 200}},
                {"delete": {"_index": "old", "_type": "_doc", "result": "deleted", "status": 200}}
            ]
        })
    );
}

#[tokio::test]
async fn test_bulk_without_collection() {
    let server = TestServer::start().await;
    let body = ndjson(&[
        r#"{"create":{"_index":"logs"}}"#,
        r#"{"msg":"hello"}"#,
        r#"{"update":{}}"#,
        r#"{"doc":{"msg":"bye"}}"#,
    ]);

    let (status, response) = server.bulk("/_bulk", &body).await;

    assert_eq!(status, StatusCode::OK);
    let items = response["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["create"]["_index"], "logs");
    assert_eq!(items[0]["create"]["status"], 201);
    assert_eq!(items[1]["update"]["_index"], "");
    assert_eq!(items[1]["update"]["result"], "updated");
}

#[tokio::test]
async fn test_bulk_error_budget_returns_partial_content() {
    let server = TestServer::start().await;
    let body = ndjson(&[
        r#"{"index":{}}"#,
        r#"{"a":1}"#,
        r#"{"index":[]}"#,
        r#"{"create":"x"}"#,
        r#"{"update":1}"#,
        r#"{"delete":true}"#,
        r#"{"index":null}"#,
        r#"{"index":{}}"#,
        r#"{"never":"reached"}"#,
    ]);

    let (status, response) = server.bulk("/orders/_bulk", &body).await;

    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    let items = response["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["index"]["status"], 200);
    for item in &items[1..] {
        let (_, fields) = item.as_object().unwrap().iter().next().unwrap();
        assert_eq!(fields["status"], 400);
        assert_eq!(fields["result"], "failed");
        assert_eq!(fields["_index"], "");
    }
}

#[tokio::test]
async fn test_bulk_skips_invisible_lines() {
    let server = TestServer::start().await;
    let body = ndjson(&["not json", "", r#"{"search":{}}"#, r#"{"delete":{}}"#]);

    let (status, response) = server.bulk("/orders/_bulk", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response["items"],
        json!([{"delete": {"_index": "orders", "_type": "_doc", "result": "deleted", "status": 200}}])
    );
}

#[tokio::test]
async fn test_bulk_truncated_entry() {
    let server = TestServer::start().await;
    let (status, response) = server
        .bulk("/orders/_bulk", "{\"delete\":{}}\n{\"index\":{}}\n")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_bulk_response_is_json() {
    let server = TestServer::start().await;
    let response = server
        .client
        .post(server.url("/_bulk"))
        .body("")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(response.text().await.unwrap(), r#"{"errors":false,"items":[]}"#);
}

#[tokio::test]
async fn test_bulk_rejects_other_methods() {
    let server = TestServer::start().await;
    let (status, _) = server.request(Method::GET, "/_bulk", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = server.request(Method::PUT, "/orders/_bulk", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_bulk_rejects_nested_collection() {
    let server = TestServer::start().await;
    let (status, _) = server.request(Method::POST, "/a/b/_bulk", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_collection_is_percent_decoded() {
    let server = TestServer::start().await;
    let (status, response) = server
        .bulk("/my%20logs/_bulk", "{\"delete\":{}}\n")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["items"][0]["delete"]["_index"], "my logs");
}

#[tokio::test]
async fn test_bulk_encoded_slash_splits_collection() {
    let server = TestServer::start().await;
    let (status, _) = server
        .request(Method::POST, "/%3Clogs-%7Bnow%2Fd%7D%3E/_bulk", "")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_template_id_is_percent_decoded() {
    let server = TestServer::start().await;
    let (status, _) = server
        .request(Method::PUT, "/_template/logs%2Dweb", "{\"v\":1}")
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = server.request(Method::GET, "/_template/logs-web", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{\"v\":1}");
}

#[tokio::test]
async fn test_empty_store_id_is_a_valid_key() {
    let server = TestServer::start().await;

    let (status, _) = server.request(Method::GET, "/_template/", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.request(Method::PUT, "/_template/", "{}").await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = server.request(Method::GET, "/_template/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{}");

    let (status, _) = server
        .request(Method::PUT, "/_ingest/pipeline/", "{}")
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_template_round_trip() {
    let server = TestServer::start().await;
    let template = r#"{"index_patterns":["logs-*"],"settings":{"number_of_shards":1}}"#;

    let (status, _) = server.request(Method::HEAD, "/_template/logs", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.request(Method::PUT, "/_template/logs", template).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = server.request(Method::HEAD, "/_template/logs", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.request(Method::GET, "/_template/logs", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, template);
}

#[tokio::test]
async fn test_template_overwrite_keeps_latest() {
    let server = TestServer::start().await;
    server.request(Method::PUT, "/_template/t", "{\"v\":1}").await;
    server.request(Method::PUT, "/_template/t", "{\"v\":2}").await;

    let (status, body) = server.request(Method::GET, "/_template/t", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "{\"v\":2}");
}

#[tokio::test]
async fn test_template_errors() {
    let server = TestServer::start().await;

    let (status, _) = server.request(Method::GET, "/_template/missing", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server.request(Method::GET, "/_template/a/b", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = server.request(Method::DELETE, "/_template/logs", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_pipeline_round_trip() {
    let server = TestServer::start().await;
    let pipeline = r#"{"processors":[{"set":{"field":"x","value":1}}]}"#;

    let (status, _) = server
        .request(Method::PUT, "/_ingest/pipeline/p1", pipeline)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = server.request(Method::GET, "/_ingest/pipeline/p1", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, pipeline);

    let (status, _) = server.request(Method::GET, "/_ingest/pipeline/p2", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pipeline_rejects_head() {
    let server = TestServer::start().await;
    server.request(Method::PUT, "/_ingest/pipeline/p1", "{}").await;

    let (status, _) = server.request(Method::HEAD, "/_ingest/pipeline/p1", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_pipeline_and_template_are_separate() {
    let server = TestServer::start().await;
    server.request(Method::PUT, "/_template/shared", "{}").await;

    let (status, _) = server.request(Method::GET, "/_ingest/pipeline/shared", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path() {
    let server = TestServer::start().await;
    let (status, _) = server.request(Method::GET, "/_cat/indices", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bounded_store_evicts_oldest() {
    let config = ServerConfig {
        store: StoreConfig::bounded(2, EvictionPolicy::Fifo).unwrap(),
        ..ServerConfig::default()
    };
    let server = TestServer::start_with(config).await;

    for id in ["a", "b", "c"] {
        let (status, _) = server
            .request(Method::PUT, &format!("/_template/{}", id), "{}")
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }

    let (status, _) = server.request(Method::HEAD, "/_template/a", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server.request(Method::HEAD, "/_template/c", "").await;
    assert_eq!(status, StatusCode::OK);
}

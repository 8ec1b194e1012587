//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use dify_knowledge::KnowledgeBaseClient;
use wiremock::{MockServer, Request};

pub const API_KEY: &str = "dataset-test-key";
pub const BEARER: &str = "Bearer dataset-test-key";

/// Starts a mock server and a client pointed at its `/v1` prefix.
pub async fn setup() -> (MockServer, KnowledgeBaseClient) {
    let server = MockServer::start().await;
    let client = KnowledgeBaseClient::new(API_KEY, format!("{}/v1", server.uri())).unwrap();
    (server, client)
}

/// The single request the server has seen so far.
pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

/// Multipart body as text, for substring assertions.
pub fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

/// Content-Type header of a recorded request.
pub fn content_type(request: &Request) -> String {
    request
        .headers
        .get("content-type")
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default()
}

pub fn document_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "document": {
            "id": id,
            "name": name,
            "indexing_status": "waiting",
            "display_status": "queuing"
        },
        "batch": "20240101120000000001"
    })
}

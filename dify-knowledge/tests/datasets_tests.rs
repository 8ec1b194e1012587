//! Dataset endpoints against a mock server.

mod common;

use common::{BEARER, setup};
use dify_knowledge::{Error, KnowledgeBaseClient, Pagination, Permission};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[tokio::test]
async fn list_datasets_returns_data_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/datasets"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "ds1", "name": "handbook", "document_count": 3},
                {"id": "ds2", "name": "faq", "document_count": 0}
            ],
            "has_more": false,
            "limit": 5,
            "total": 2,
            "page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let datasets = client.list_datasets(Pagination::new(2, 5)).await.unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0].id, "ds1");
    assert_eq!(datasets[0].document_count, Some(3));
    assert_eq!(datasets[1].name, "faq");
}

#[tokio::test]
async fn list_datasets_defaults_to_first_page_of_twenty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/datasets"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"has_more": false})))
        .expect(1)
        .mount(&server)
        .await;

    let datasets = client.list_datasets(Pagination::default()).await.unwrap();
    assert!(datasets.is_empty());
}

#[tokio::test]
async fn create_dataset_posts_name_and_default_permission() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/datasets"))
        .and(header("authorization", BEARER))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "handbook", "permission": "all_team_members"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "ds1", "name": "handbook", "permission": "all_team_members"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dataset = client.create_dataset("handbook", None).await.unwrap();
    assert_eq!(dataset.id, "ds1");
    assert_eq!(dataset.permission.as_deref(), Some("all_team_members"));
}

#[tokio::test]
async fn create_dataset_with_explicit_permission() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/datasets"))
        .and(body_json(json!({"name": "private", "permission": "only_me"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ds9", "name": "private"})))
        .expect(1)
        .mount(&server)
        .await;

    let dataset = client.create_dataset("private", Some(Permission::OnlyMe)).await.unwrap();
    assert_eq!(dataset.id, "ds9");
}

#[tokio::test]
async fn delete_dataset_accepts_no_content() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/datasets/ds1"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_dataset("ds1").await.unwrap();
}

#[tokio::test]
async fn client_error_exposes_status_and_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/datasets/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"code": "not_found"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.delete_dataset("missing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    match err {
        Error::BadResponse { code, description } => {
            assert_eq!(code, 404);
            assert_eq!(description.as_deref(), Some(r#"{"code": "not_found"}"#));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_error_is_not_parsed_as_success() {
    let (server, client) = setup().await;

    // A body that would decode fine as a dataset list must still be rejected.
    Mock::given(method("GET"))
        .and(path("/v1/datasets"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"data": [{"id": "ds1", "name": "x"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client.list_datasets(Pagination::default()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.create_dataset("handbook", None).await.unwrap_err();
    assert!(matches!(err, Error::DecodeResponse { .. }), "got {err}");
}

#[tokio::test]
async fn transport_failure_is_reported_with_url() {
    let client = KnowledgeBaseClient::new("dataset-test-key", "http://127.0.0.1:1/v1").unwrap();

    let err = client.delete_dataset("ds1").await.unwrap_err();
    match err {
        Error::PerformRequest { url, .. } => {
            assert_eq!(url.as_str(), "http://127.0.0.1:1/v1/datasets/ds1")
        }
        other => panic!("unexpected error: {other}"),
    }
}

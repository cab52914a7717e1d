use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use reqwest::Client;
use serde_json::{json, Value};
use site_core::{Credentials, NotionConfig, NotionProxy};
use site_server::{router, AppState};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer, credentials: Credentials) -> Router {
    let config = NotionConfig {
        api_base_url: server.uri(),
        ..NotionConfig::default()
    };
    router(AppState {
        proxy: Arc::new(NotionProxy::new(Client::new(), config, credentials)),
    })
}

fn credentials() -> Credentials {
    Credentials::from_vars([("NOTION_API_KEY", "secret"), ("NOTION_DB_NEWS", "db-news")])
}

async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("origin", "https://school.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn posts_endpoint_wraps_items() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/databases/db-news/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "p1",
                "created_time": "2024-10-21T07:28:00.000Z",
                "url": "https://www.notion.so/p1",
                "properties": { "Name": { "type": "title", "title": [{ "plain_text": "Hello" }] } }
            }]
        })))
        .mount(&server)
        .await;

    let (status, headers, body) =
        call(app(&server, credentials()), Method::GET, "/api/get-notion-posts?type=news").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "*");
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["type"], "news");
    assert_eq!(body["posts"][0]["title"], "Hello");
    assert_eq!(body["posts"][0]["pageUrl"], "https://www.notion.so/p1");
}

#[tokio::test]
async fn unknown_category_is_a_client_error() {
    let server = MockServer::start().await;

    let (status, _, body) =
        call(app(&server, credentials()), Method::GET, "/api/get-notion-posts?type=foo").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "unknown category: foo");
    assert!(body.get("posts").is_none());
}

#[tokio::test]
async fn upstream_status_is_mirrored_with_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/databases/db-news/query"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "object": "error",
            "message": "Rate limited"
        })))
        .mount(&server)
        .await;

    let (status, _, body) =
        call(app(&server, credentials()), Method::GET, "/api/get-notion-posts?type=news").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["details"], "Rate limited");
}

#[tokio::test]
async fn missing_key_fails_posts_with_server_error() {
    let server = MockServer::start().await;

    let (status, _, body) = call(
        app(&server, Credentials::default()),
        Method::GET,
        "/api/get-notion-posts",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn content_endpoint_requires_page_id() {
    let server = MockServer::start().await;

    let (status, _, body) =
        call(app(&server, credentials()), Method::GET, "/api/get-notion-content").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn content_endpoint_returns_page_and_blocks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "abc", "object": "page" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blocks/abc/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "type": "divider", "divider": {} }]
        })))
        .mount(&server)
        .await;

    let (status, _, body) = call(
        app(&server, credentials()),
        Method::GET,
        "/api/get-notion-content?pageId=abc",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["page"]["id"], "abc");
    assert_eq!(body["blocks"][0]["type"], "divider");
}

#[tokio::test]
async fn content_upstream_failure_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pages/abc"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (status, _, body) = call(
        app(&server, credentials()),
        Method::GET,
        "/api/get-notion-content?pageId=abc",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "failed to retrieve page metadata");
}

#[tokio::test]
async fn options_returns_empty_ok() {
    let server = MockServer::start().await;

    for uri in ["/api/get-notion-posts", "/api/get-notion-content"] {
        let (status, headers, body) = call(app(&server, credentials()), Method::OPTIONS, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(headers["access-control-allow-origin"], "*");
    }
}

#[tokio::test]
async fn dot_segment_page_id_is_a_client_error() {
    let server = MockServer::start().await;

    let (status, _, body) = call(
        app(&server, credentials()),
        Method::GET,
        "/api/get-notion-content?pageId=..",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "invalid page id: ..");
    assert!(server.received_requests().await.unwrap().is_empty());
}

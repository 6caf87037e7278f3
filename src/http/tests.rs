//! Tests for the HTTP client module

use super::*;
use crate::types::BackoffType;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 3);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_some());
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("limit", "30")
        .query("skip", "60")
        .retries(2);

    assert_eq!(config.query.get("limit"), Some(&"30".to_string()));
    assert_eq!(config.query.get("skip"), Some(&"60".to_string()));
    assert_eq!(config.max_retries, Some(2));
}

#[tokio::test]
async fn test_http_client_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [{"id": 1, "firstName": "Alice"}],
            "total": 1
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client.get("/users").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_get_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("limit", "30"))
        .and(query_param("skip", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "products": [],
            "total": 0
        })))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let body: serde_json::Value = client
        .get_json_with_config(
            "/products",
            RequestConfig::new().query("limit", "30").query("skip", "0"),
        )
        .await
        .unwrap();

    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_http_client_retries_server_error() {
    let mock_server = MockServer::start().await;

    // First two attempts fail, third succeeds
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(3)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(10),
            Duration::from_millis(10),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let response = client.get("/flaky").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_client_error_is_terminal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(3)
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let err = client.get("/missing").await.unwrap_err();
    match err {
        crate::error::Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_client_exhausts_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(2)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(5),
        )
        .no_rate_limit()
        .build();

    let client = HttpClient::with_config(config);
    let err = client.get("/down").await.unwrap_err();
    assert!(matches!(
        err,
        crate::error::Error::HttpStatus { status: 500, .. }
    ));
}

#[test]
fn test_calculate_backoff() {
    let config = HttpClientConfig::builder()
        .backoff(
            BackoffType::Exponential,
            Duration::from_millis(100),
            Duration::from_secs(10),
        )
        .no_rate_limit()
        .build();
    let client = HttpClient::with_config(config);

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    // Capped at max_backoff
    assert_eq!(client.calculate_backoff(20), Duration::from_secs(10));
}

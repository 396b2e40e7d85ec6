//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.user_agent.starts_with("buildops-connector/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.buildops.com")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://api.buildops.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("limit", "100")
        .header("tenantId", "tenant-1")
        .json(serde_json::json!({"key": "value"}));

    assert_eq!(config.query.get("page"), Some(&"1".to_string()));
    assert_eq!(config.query.get("limit"), Some(&"100".to_string()));
    assert_eq!(config.headers.get("tenantId"), Some(&"tenant-1".to_string()));
    assert!(config.body.is_some());
}

#[test]
fn test_invalid_base_url_rejected() {
    let config = HttpClientConfig::builder().base_url("not a url").build();
    let result = HttpClient::with_config(config);
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn test_build_url() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.buildops.com/")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("/v1/customers").unwrap().as_str(),
        "https://api.buildops.com/v1/customers"
    );
    assert_eq!(
        client.build_url("v1/customers").unwrap().as_str(),
        "https://api.buildops.com/v1/customers"
    );
    assert_eq!(
        client.build_url("http://other.example/v1/x").unwrap().as_str(),
        "http://other.example/v1/x"
    );
}

#[test]
fn test_build_url_keeps_base_path() {
    let config = HttpClientConfig::builder()
        .base_url("http://localhost:9000/proxy")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    assert_eq!(
        client.build_url("/v1/auth/token").unwrap().as_str(),
        "http://localhost:9000/proxy/v1/auth/token"
    );
}

#[test]
fn test_relative_path_without_base_rejected() {
    let client = HttpClient::with_config(HttpClientConfig::default()).unwrap();
    assert!(matches!(
        client.build_url("/v1/customers"),
        Err(Error::InvalidUrl(_))
    ));
}

#[test]
fn test_invalid_default_header_rejected() {
    let config = HttpClientConfig::builder()
        .header("bad header", "value")
        .build();
    assert!(matches!(
        HttpClient::with_config(config),
        Err(Error::Config { .. })
    ));
}

#[tokio::test]
async fn test_http_client_get_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"id": 1}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body: serde_json::Value = client
        .get_json_with_config(
            "/v1/customers",
            RequestConfig::new().query("page", "2").query("limit", "100"),
        )
        .await
        .unwrap();

    assert_eq!(body["items"][0]["id"], 1);
}

#[tokio::test]
async fn test_http_client_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .and(body_json(serde_json::json!({"clientId": "a"})))
        .respond_with(ResponseTemplate::new(201))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .post("/v1/auth/token", serde_json::json!({"clientId": "a"}))
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_http_client_default_and_request_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/vendors"))
        .and(header("X-Default", "yes"))
        .and(header("tenantId", "tenant-9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Default", "yes")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get_with_config("/v1/vendors", RequestConfig::new().header("tenantId", "tenant-9"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_error_status_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoices"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_with_config("/v1/invoices", RequestConfig::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::HttpStatus { status: 503, ref body } if body == "unavailable"
    ));
}

#[tokio::test]
async fn test_http_client_404_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .get_with_config("/v1/missing", RequestConfig::new())
        .await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 404, .. })));
}

#[test]
fn test_http_client_debug() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.buildops.com")
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("https://api.buildops.com/"));
}

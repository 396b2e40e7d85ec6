//! Tests for the auth module

use super::*;
use crate::config::ConnectorConfig;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authenticator_for(server: &MockServer) -> Authenticator {
    let http = HttpClient::with_config(HttpClientConfig::builder().base_url(server.uri()).build())
        .unwrap();
    Authenticator::new(ConnectorConfig::new("my-client", "my-secret", "tenant-42"), http)
}

fn token_response(token: &str, expires_in: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": token,
        "expires_in": expires_in,
    }))
}

#[tokio::test]
async fn test_token_request_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .and(body_json(serde_json::json!({
            "clientId": "my-client",
            "clientSecret": "my-secret",
        })))
        .respond_with(token_response("token-123", 3600))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    let headers = auth.get_auth_headers().await.unwrap();

    assert_eq!(headers.authorization, "Bearer token-123");
    assert_eq!(headers.tenant_id, "tenant-42");
}

#[tokio::test]
async fn test_token_is_cached_within_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(token_response("cached-token", 3600))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);

    for _ in 0..3 {
        let headers = auth.get_auth_headers().await.unwrap();
        assert_eq!(headers.authorization, "Bearer cached-token");
    }
}

#[tokio::test]
async fn test_expired_token_is_refreshed_once_per_call() {
    let mock_server = MockServer::start().await;

    // A TTL equal to the margin yields a token that is already expired
    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(token_response("short-lived", EXPIRY_MARGIN_SECS))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    auth.get_auth_headers().await.unwrap();
    auth.get_auth_headers().await.unwrap();
}

#[tokio::test]
async fn test_clear_cache_forces_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(token_response("token", 3600))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    auth.get_auth_headers().await.unwrap();
    assert!(auth.cached_token().await.is_some());

    auth.clear_cache().await;
    assert!(auth.cached_token().await.is_none());

    auth.get_auth_headers().await.unwrap();
}

#[tokio::test]
async fn test_cached_expiry_uses_margin() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(token_response("token", 3600))
        .mount(&mock_server)
        .await;

    let before = chrono::Utc::now();
    let auth = authenticator_for(&mock_server);
    auth.get_auth_headers().await.unwrap();
    let after = chrono::Utc::now();

    let cached = auth.cached_token().await.unwrap();
    assert!(cached.expires_at >= before + chrono::Duration::seconds(3300));
    assert!(cached.expires_at <= after + chrono::Duration::seconds(3300));
}

#[tokio::test]
async fn test_token_endpoint_failure_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad client"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    let err = auth.get_auth_headers().await.unwrap_err();

    match err {
        Error::Auth { message } => {
            assert!(message.contains("401"));
            assert!(message.contains("bad client"));
        }
        other => panic!("expected auth error, got {other:?}"),
    }
    assert!(auth.cached_token().await.is_none());
}

#[tokio::test]
async fn test_malformed_token_response_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "wrong-shape"
        })))
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    let err = auth.get_auth_headers().await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(
            token_response("shared", 3600).set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = std::sync::Arc::new(authenticator_for(&mock_server));
    let a = tokio::spawn({
        let auth = auth.clone();
        async move { auth.get_auth_headers().await }
    });
    let b = tokio::spawn({
        let auth = auth.clone();
        async move { auth.get_auth_headers().await }
    });

    assert_eq!(a.await.unwrap().unwrap().authorization, "Bearer shared");
    assert_eq!(b.await.unwrap().unwrap().authorization, "Bearer shared");
}

#[tokio::test]
async fn test_fractional_expires_in_is_accepted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "float-ttl",
            "expires_in": 3600.0,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    let headers = auth.get_auth_headers().await.unwrap();
    assert_eq!(headers.authorization, "Bearer float-ttl");

    let cached = auth.cached_token().await.unwrap();
    assert!(!cached.is_expired());
}

#[tokio::test]
async fn test_out_of_range_expires_in_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "forever",
            "expires_in": 10_000_000_000_000_i64,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = authenticator_for(&mock_server);
    let err = auth.get_auth_headers().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
    assert!(auth.cached_token().await.is_none());
}

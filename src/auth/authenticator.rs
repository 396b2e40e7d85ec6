//! Authenticator implementation
//!
//! Exchanges client credentials for a bearer token and caches it until the
//! margin-adjusted expiry passes.

use super::types::{AuthHeaders, CachedToken, TokenResponse};
use crate::config::ConnectorConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Token endpoint path relative to the API base URL
pub const TOKEN_PATH: &str = "/v1/auth/token";

/// Authenticator holding the cached BuildOps credential
pub struct Authenticator {
    /// API credentials
    config: ConnectorConfig,
    /// Cached bearer token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: HttpClient,
}

impl Authenticator {
    /// Create an authenticator issuing token requests through `http_client`
    pub fn new(config: ConnectorConfig, http_client: HttpClient) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Headers for a resource request, refreshing the token if necessary
    pub async fn get_auth_headers(&self) -> Result<AuthHeaders> {
        let token = self.get_or_refresh_token().await?;
        Ok(AuthHeaders::bearer(&token, &self.config.tenant_id))
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another trigger may have refreshed while we waited for the lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange client credentials for a new token
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        info!("Fetching new access token from BuildOps");

        let body = json!({
            "clientId": self.config.client_id,
            "clientSecret": self.config.client_secret,
        });

        let response = self
            .http_client
            .post(TOKEN_PATH, body)
            .await
            .map_err(|e| match e {
                Error::HttpStatus { status, body } => Error::Auth {
                    message: format!("Token request failed with status {status}: {body}"),
                },
                other => Error::Auth {
                    message: format!("Token request failed: {other}"),
                },
            })?;

        let token_response: TokenResponse = response.json().await.map_err(|e| Error::Auth {
            message: format!("Invalid token response: {e}"),
        })?;

        let token = CachedToken::from_ttl(
            token_response.access_token,
            token_response.expires_in,
            Utc::now(),
        )?;
        debug!("Token valid until {}", token.expires_at);

        Ok(token)
    }

    /// Currently cached token, if any
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.cached_token.read().await.clone()
    }

    /// Clear the cached token so the next call refreshes
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the API credentials
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("config", &self.config)
            .field("http_client", &self.http_client)
            .finish_non_exhaustive()
    }
}

//! HTTP server mode: the `/sync` trigger endpoint

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::auth::BasicCredentials;
use crate::config::TriggerCredentials;
use crate::engine::SyncEngine;
use crate::error::{Error, Result};
use crate::pagination::Paginator;
use crate::sink::Sink;

/// Shared state for the trigger endpoint
///
/// The paginator holds the long-lived authenticator, so the cached token is
/// reused across triggers.
#[derive(Clone)]
pub struct AppState {
    paginator: Paginator,
    sink: Arc<dyn Sink>,
    trigger: Option<TriggerCredentials>,
}

impl AppState {
    /// Create server state
    pub fn new(
        paginator: Paginator,
        sink: Arc<dyn Sink>,
        trigger: Option<TriggerCredentials>,
    ) -> Self {
        Self {
            paginator,
            sink,
            trigger,
        }
    }

    /// Check the trigger's Basic credentials
    fn authorize(&self, headers: &HeaderMap) -> Result<()> {
        let Some(expected) = &self.trigger else {
            return Err(Error::Unauthorized);
        };

        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(BasicCredentials::parse)
            .ok_or(Error::Unauthorized)?;

        if expected.verify(&presented.username, &presented.password) {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }
}

/// Optional trigger body
#[derive(Debug, Default, Deserialize)]
struct SyncRequest {
    /// State from the previous run, passed through
    #[serde(default)]
    state: Option<Value>,
}

/// Successful sync response
#[derive(Debug, Serialize)]
struct SyncResponse {
    status: &'static str,
    state: Value,
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Unauthorized",
                    message: None,
                }),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal Server Error",
                    message: Some(other.to_string()),
                }),
            )
                .into_response(),
        }
    }
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sync", post(sync_data))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Run a full sync
async fn sync_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(e) = state.authorize(&headers) {
        warn!("Unauthorized sync attempt");
        return e.into_response();
    }
    info!("Sync request authorized");

    let prior_state = match parse_request(&body) {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid sync request: {}", e);
            return e.into_response();
        }
    };

    let mut engine = SyncEngine::new(state.paginator.clone(), state.sink.clone());
    match engine.sync(prior_state).await {
        Ok(report) => (
            StatusCode::OK,
            Json(SyncResponse {
                status: "success",
                state: report.state,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Error handling sync request: {}", e);
            e.into_response()
        }
    }
}

/// Extract the pass-through state; an empty body means `{}`
fn parse_request(body: &[u8]) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }
    let req: SyncRequest = serde_json::from_slice(body)?;
    Ok(req.state.unwrap_or_else(|| json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_empty_body() {
        assert_eq!(parse_request(b"").unwrap(), json!({}));
        assert_eq!(parse_request(b"  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_parse_request_with_state() {
        let state = parse_request(br#"{"state": {"cursor": 3}}"#).unwrap();
        assert_eq!(state, json!({"cursor": 3}));
    }

    #[test]
    fn test_parse_request_without_state() {
        assert_eq!(parse_request(br#"{"other": 1}"#).unwrap(), json!({}));
    }

    #[test]
    fn test_parse_request_invalid_json() {
        assert!(matches!(parse_request(b"{nope"), Err(Error::JsonParse(_))));
    }
}

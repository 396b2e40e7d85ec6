//! Runtime configuration
//!
//! Credentials and API settings are read from the environment. Every loader
//! takes a lookup function so it can be driven from a map in tests.

use crate::error::{Error, Result};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Environment Variables
// ============================================================================

/// BuildOps OAuth client id
pub const ENV_CLIENT_ID: &str = "BUILDOPS_CLIENT_ID";
/// BuildOps OAuth client secret
pub const ENV_CLIENT_SECRET: &str = "BUILDOPS_CLIENT_SECRET";
/// BuildOps tenant identifier
pub const ENV_TENANT_ID: &str = "BUILDOPS_TENANT_ID";
/// Basic auth username expected on `/sync`
pub const ENV_SYSTEM_KEY: &str = "FIVETRAN_SYSTEM_KEY";
/// Basic auth password expected on `/sync`
pub const ENV_SYSTEM_SECRET: &str = "FIVETRAN_SYSTEM_SECRET";

/// Production API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.buildops.com";
/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;
/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Connector Config
// ============================================================================

/// Credentials for the BuildOps API
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Tenant sent with every request
    pub tenant_id: String,
}

impl ConnectorConfig {
    /// Create a config from explicit values
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            tenant_id: tenant_id.into(),
        }
    }

    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using a custom lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            client_id: required(&lookup, ENV_CLIENT_ID)?,
            client_secret: required(&lookup, ENV_CLIENT_SECRET)?,
            tenant_id: required(&lookup, ENV_TENANT_ID)?,
        })
    }
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

// ============================================================================
// Trigger Credentials
// ============================================================================

/// Basic auth credentials the orchestrator must present on `/sync`
#[derive(Clone, PartialEq, Eq)]
pub struct TriggerCredentials {
    /// Expected username
    pub key: String,
    /// Expected password
    pub secret: String,
}

impl TriggerCredentials {
    /// Create credentials from explicit values
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Load from process environment
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using a custom lookup. Both values must be set and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup(ENV_SYSTEM_KEY).filter(|v| !v.is_empty())?;
        let secret = lookup(ENV_SYSTEM_SECRET).filter(|v| !v.is_empty())?;
        Some(Self { key, secret })
    }

    /// Check a presented username/password pair
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so the outcome does not depend on which half is wrong
        let key_ok = self.key.as_bytes() == username.as_bytes();
        let secret_ok = self.secret.as_bytes() == password.as_bytes();
        key_ok & secret_ok
    }
}

impl fmt::Debug for TriggerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriggerCredentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

// ============================================================================
// API Settings
// ============================================================================

/// Upstream API settings that are not credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Pause between page requests
    pub page_delay: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_delay: crate::pagination::DEFAULT_PAGE_DELAY,
        }
    }
}

impl ApiSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the inter-page delay
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::missing_field(key)),
    }
}

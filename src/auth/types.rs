//! Auth types
//!
//! The cached bearer credential and the header set derived from it.

use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Seconds subtracted from the upstream TTL so a token never expires mid-request
pub const EXPIRY_MARGIN_SECS: i64 = 300;

/// Cached token with expiration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token must be refreshed
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token from an upstream TTL, applying the safety margin.
    ///
    /// Fails with [`Error::Auth`] when the TTL is not finite or the expiry
    /// falls outside the representable date range.
    pub fn from_ttl(token: String, ttl_seconds: f64, now: DateTime<Utc>) -> Result<Self> {
        let out_of_range = || Error::auth(format!("Token TTL out of range: {ttl_seconds}"));

        if !ttl_seconds.is_finite() {
            return Err(out_of_range());
        }
        // Float to int casts saturate, so the checked calls below see i64 bounds at worst
        let ttl_millis = (ttl_seconds * 1000.0).round() as i64;
        let lifetime = Duration::try_milliseconds(ttl_millis)
            .and_then(|ttl| ttl.checked_sub(&Duration::seconds(EXPIRY_MARGIN_SECS)))
            .ok_or_else(out_of_range)?;
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(out_of_range)?;

        Ok(Self { token, expires_at })
    }

    /// Check if the token is expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Check if the token is expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    /// Seconds; integral or fractional
    pub expires_in: f64,
}

/// Headers attached to every resource request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    /// `Authorization` header value (`Bearer <token>`)
    pub authorization: String,
    /// `tenantId` header value
    pub tenant_id: String,
}

impl AuthHeaders {
    /// Header name for the tenant
    pub const TENANT_HEADER: &'static str = "tenantId";

    /// Build headers from a bearer token and tenant
    pub fn bearer(token: &str, tenant_id: &str) -> Self {
        Self {
            authorization: format!("Bearer {token}"),
            tenant_id: tenant_id.to_string(),
        }
    }

    /// Header name/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("Authorization", self.authorization.as_str()),
            (Self::TENANT_HEADER, self.tenant_id.as_str()),
        ]
        .into_iter()
    }
}

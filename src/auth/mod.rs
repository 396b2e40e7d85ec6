//! Authentication module
//!
//! Outbound: the `Authenticator` exchanges client credentials for a bearer
//! token and caches it until expiry.
//! Inbound: `BasicCredentials` parses the trigger's Basic auth header.

mod authenticator;
mod basic;
mod types;

pub use authenticator::{Authenticator, TOKEN_PATH};
pub use basic::BasicCredentials;
pub use types::{AuthHeaders, CachedToken, EXPIRY_MARGIN_SECS};

#[cfg(test)]
mod tests;

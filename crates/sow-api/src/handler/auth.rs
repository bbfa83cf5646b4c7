//! Bearer key authorization
//!
//! The service has a single shared secret. A request is authorized when its
//! `Authorization` header is exactly `Bearer <key>`: case-sensitive, no
//! trimming, no partial matches. The comparison runs in constant time with
//! respect to the header contents.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderValue},
};
use constant_time_eq::constant_time_eq;
use secrecy::{ExposeSecret, Secret};
use std::fmt;
use std::sync::Arc;

use super::ApiError;
use crate::error::ConfigError;

/// Scheme prefix expected in the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Shared API key
///
/// Holds the full expected header value so each request costs a single
/// comparison. The secret is never printed by `Debug`.
#[derive(Clone)]
pub struct ApiKey {
    expected: Arc<Secret<String>>,
}

impl ApiKey {
    /// Wrap a configured key, rejecting empty or whitespace-only values
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self {
            expected: Arc::new(Secret::new(format!("{}{}", BEARER_PREFIX, key))),
        })
    }

    /// The raw key, without the bearer prefix
    pub fn expose_secret(&self) -> &str {
        &self.expected.expose_secret()[BEARER_PREFIX.len()..]
    }

    /// Check a raw `Authorization` header value
    pub fn matches(&self, header: &[u8]) -> bool {
        constant_time_eq(header, self.expected.expose_secret().as_bytes())
    }

    /// Check an optional header as received on a request
    pub fn authorizes(&self, header: Option<&HeaderValue>) -> bool {
        header.is_some_and(|value| self.matches(value.as_bytes()))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Extractor that admits only requests carrying the configured bearer key
///
/// Place it before any body extractor so unauthorized requests are rejected
/// without the body being read.
#[derive(Debug, Clone, Copy)]
pub struct BearerAuth;

#[async_trait]
impl<S> FromRequestParts<S> for BearerAuth
where
    ApiKey: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let api_key = ApiKey::from_ref(state);
        let header = parts.headers.get(AUTHORIZATION);

        if api_key.authorizes(header) {
            Ok(BearerAuth)
        } else {
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                header_present = header.is_some(),
                "Rejected request with invalid or missing API key"
            );
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("s3cr3t").unwrap()
    }

    #[test]
    fn test_exact_header_matches() {
        assert!(key().matches(b"Bearer s3cr3t"));
    }

    #[test]
    fn test_mismatches() {
        let key = key();
        assert!(!key.matches(b""));
        assert!(!key.matches(b"s3cr3t"));
        assert!(!key.matches(b"bearer s3cr3t"));
        assert!(!key.matches(b"BEARER s3cr3t"));
        assert!(!key.matches(b"Bearer S3CR3T"));
        assert!(!key.matches(b"Bearer s3cr3"));
        assert!(!key.matches(b"Bearer s3cr3tt"));
        assert!(!key.matches(b" Bearer s3cr3t"));
        assert!(!key.matches(b"Bearer s3cr3t "));
        assert!(!key.matches(b"Bearer  s3cr3t"));
        assert!(!key.matches(b"Basic s3cr3t"));
    }

    #[test]
    fn test_missing_header_is_rejected() {
        assert!(!key().authorizes(None));
        let value = HeaderValue::from_static("Bearer s3cr3t");
        assert!(key().authorizes(Some(&value)));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new(" \t"), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_expose_secret_strips_prefix() {
        assert_eq!(key().expose_secret(), "s3cr3t");
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug = format!("{:?}", key());
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("REDACTED"));
    }
}

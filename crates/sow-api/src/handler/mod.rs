//! HTTP handler for the SOW service
//!
//! ## Architecture
//!
//! - `auth`: the shared API key and the `BearerAuth` extractor
//! - `routes`: router construction, the SOW and health handlers, error mapping
//! - `middleware`: request ids, request logging and the CORS policy
//!
//! Every failure is answered with the same JSON envelope, `{"detail": "..."}`.

pub mod auth;
pub mod middleware;
pub mod routes;

pub use auth::{ApiKey, BearerAuth, BEARER_PREFIX};
pub use middleware::{cors_layer, request_logging_middleware, REQUEST_ID_HEADER};
pub use routes::{
    create_router, extract_sow, health_check, ApiError, AppState, UNAUTHORIZED_DETAIL,
};

use serde::{Deserialize, Serialize};

/// Error body returned for every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: String,
    /// Service identifier
    pub service: String,
    /// Crate version
    pub version: String,
    /// Process start time (RFC 3339)
    pub started_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody::new("Invalid or missing API Key");
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"detail":"Invalid or missing API Key"}"#);
    }
}

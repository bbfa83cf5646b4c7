//! Error types for the SOW service
//!
//! Startup problems are reported as [`ConfigError`]. Request-time failures are
//! modelled by [`crate::handler::ApiError`], which maps onto HTTP responses.

use thiserror::Error;

/// Errors raised while assembling the service configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No API key was supplied by any configuration source
    #[error("API key is not configured (set --api-key or {0})")]
    MissingApiKey(&'static str),

    /// The API key was supplied but is empty or only whitespace
    #[error("API key must not be empty")]
    EmptyApiKey,

    /// The endpoint URL could not be parsed
    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Route paths must be absolute and made of literal segments
    #[error("Route path '{0}' must start with '/' and contain no ':' or '*'")]
    InvalidRoutePath(String),

    /// The env file exists but could not be read
    #[error("Failed to read env file {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an invalid endpoint error
    pub fn invalid_endpoint(url: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidEndpoint {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::MissingApiKey("NEXT_PUBLIC_API_KEY");
        assert!(err.to_string().contains("NEXT_PUBLIC_API_KEY"));

        let err = ConfigError::InvalidRoutePath("extract".to_string());
        assert_eq!(
            err.to_string(),
            "Route path 'extract' must start with '/' and contain no ':' or '*'"
        );
    }

    #[test]
    fn test_invalid_endpoint_constructor() {
        let err = ConfigError::invalid_endpoint("::bad", "invalid format");
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        assert!(err.to_string().contains("::bad"));
    }
}

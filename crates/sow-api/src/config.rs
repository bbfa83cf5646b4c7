//! Service configuration
//!
//! The service is configured once at startup and the resulting
//! [`ServiceConfig`] is injected into the router. Values are resolved with a
//! single precedence order:
//!
//! 1. command line flags
//! 2. process environment (handled by `clap`'s `env` attribute)
//! 3. an optional `.env`-style file, `.env.local` by default, so the service can
//!    share its key with the front end that calls it
//! 4. built-in defaults
//!
//! The route path is either given explicitly or derived from the path
//! component of a full endpoint URL such as `http://localhost:8000/generate_sow`.

use axum::http::Uri;
use std::collections::HashMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::handler::ApiKey;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address (all interfaces)
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Route used when neither a route path nor an endpoint URL is configured
pub const DEFAULT_ROUTE_PATH: &str = "/extract_sow";

/// Environment variable holding the shared API key
pub const API_KEY_VAR: &str = "NEXT_PUBLIC_API_KEY";

/// Environment variable holding the full endpoint URL
pub const ENDPOINT_VAR: &str = "NEXT_PUBLIC_API_ENDPOINT";

/// Env file read when none is given explicitly
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub listen_port: u16,
    /// Path the SOW endpoint is mounted on
    pub route_path: String,
    /// Shared bearer credential
    pub api_key: ApiKey,
}

impl ServiceConfig {
    /// Build a configuration with default host, port and route
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            host: DEFAULT_HOST,
            listen_port: DEFAULT_PORT,
            route_path: DEFAULT_ROUTE_PATH.to_string(),
            api_key,
        }
    }

    pub fn with_route_path(mut self, route_path: impl Into<String>) -> Self {
        self.route_path = route_path.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.listen_port = port;
        self
    }

    /// Resolve the configuration from explicit sources and an env file
    ///
    /// Fails fast when no usable API key is available, when the endpoint URL
    /// does not parse, or when the resulting route path is not an absolute,
    /// literal path.
    pub fn resolve(sources: ConfigSources, env_file: &EnvFile) -> Result<Self> {
        let raw_key = sources
            .api_key
            .or_else(|| env_file.get(API_KEY_VAR).map(str::to_string))
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;
        let api_key = ApiKey::new(raw_key)?;

        let route_path = match sources.route_path {
            Some(path) => path,
            None => match sources
                .endpoint
                .or_else(|| env_file.get(ENDPOINT_VAR).map(str::to_string))
            {
                Some(url) => route_path_from_endpoint(&url)?,
                None => DEFAULT_ROUTE_PATH.to_string(),
            },
        };
        validate_route_path(&route_path)?;

        Ok(Self {
            host: sources.host.unwrap_or(DEFAULT_HOST),
            listen_port: sources.port.unwrap_or(DEFAULT_PORT),
            route_path,
            api_key,
        })
    }

    /// Socket address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.listen_port)
    }
}

/// Raw configuration values collected from the command line and environment
#[derive(Clone, Default)]
pub struct ConfigSources {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub route_path: Option<String>,
}

/// Extract the route path from a full endpoint URL
///
/// Only the path is kept; scheme, authority and query are discarded. A URL
/// without a path maps to `/`.
pub fn route_path_from_endpoint(url: &str) -> Result<String> {
    let uri: Uri = url
        .trim()
        .parse()
        .map_err(|e: axum::http::uri::InvalidUri| {
            ConfigError::invalid_endpoint(url, e.to_string())
        })?;

    let path = uri.path();
    if path.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(path.to_string())
    }
}

// The path is mounted literally; `:` and `*` would turn into router captures.
fn validate_route_path(path: &str) -> Result<()> {
    let literal = path.starts_with('/') && !path.contains([':', '*']);

    if literal {
        Ok(())
    } else {
        Err(ConfigError::InvalidRoutePath(path.to_string()))
    }
}

/// Values parsed from a `.env`-style file
///
/// Supported syntax:
/// ```text
/// # Comment
/// KEY=value
/// export KEY=value
/// QUOTED="value with spaces"
/// ESCAPED="line1\nline2"
/// ```
#[derive(Clone, Default)]
pub struct EnvFile {
    path: Option<PathBuf>,
    values: HashMap<String, String>,
}

impl EnvFile {
    /// Load an env file, treating a missing file as empty
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Env file not found, skipping");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        })?;

        let mut file = Self::parse(&content);
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    /// Parse env file content
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim().to_string();
                if key.is_empty() {
                    continue;
                }
                let value = unquote(line[eq_pos + 1..].trim())
                    .replace("\\n", "\n")
                    .replace("\\t", "\t")
                    .replace("\\r", "\r");

                values.insert(key, value);
            }
        }

        Self { path: None, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Path the values were read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// Values may hold the API key; only the key names are printed.
impl fmt::Debug for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("EnvFile")
            .field("path", &self.path)
            .field("keys", &keys)
            .finish()
    }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && ((bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"')
            || (bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\''))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

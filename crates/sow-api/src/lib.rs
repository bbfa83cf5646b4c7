//! Mock Statement of Work service
//!
//! A single-endpoint HTTP service: a caller posts a contract type and a list
//! of filenames with a shared bearer key, and receives a templated SOW text.
//! Nothing is parsed, generated or stored; the response is a pure function of
//! the request and the configured key.
//!
//! ## Architecture
//!
//! 1. **SOW** (`sow`): request/response payloads and the template renderer.
//! 2. **Config** (`config`): startup configuration from flags, environment and
//!    an optional `.env.local` file.
//! 3. **Handler** (`handler/`): bearer authorization, routes, middleware and
//!    CORS.
//! 4. **CLI** (`cli`): `serve` and `render` commands.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sow_api::{create_router, ApiKey, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::new(ApiKey::new("s3cr3t")?);
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, create_router(&config)).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod sow;
pub mod telemetry;

pub use config::{ConfigSources, EnvFile, ServiceConfig};
pub use error::ConfigError;
pub use handler::{create_router, ApiError, ApiKey, AppState, ErrorBody, HealthResponse};
pub use sow::{render_sow, DocumentRequest, SowResponse};
pub use telemetry::{init_tracing, LogFormat};

/// Service identifier
pub const SERVICE_NAME: &str = "sow-api";

/// Service version (from Cargo.toml)
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serve until Ctrl-C or SIGTERM
///
/// In-flight requests are allowed to finish before the function returns.
pub async fn serve(config: ServiceConfig) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let router = create_router(&config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        route = %config.route_path,
        version = SERVICE_VERSION,
        "Starting SOW service"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("SOW service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

//! Command-line interface
//!
//! ```bash
//! # Serve on 0.0.0.0:8000, key and endpoint taken from .env.local
//! sow-api serve
//!
//! # Explicit key and route
//! sow-api serve --api-key s3cr3t --route-path /generate_sow
//!
//! # Print a SOW without starting the server
//! sow-api render --contract-type NDA a.pdf b.pdf
//! ```

use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::{
    ConfigSources, EnvFile, ServiceConfig, DEFAULT_ENV_FILE, DEFAULT_HOST, DEFAULT_PORT,
};
use crate::error::Result;
use crate::telemetry::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "sow-api")]
#[command(about = "Mock Statement of Work service")]
#[command(version)]
pub struct Cli {
    /// Log output format
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = LogFormat::Json,
        env = "SOW_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Render a SOW to stdout
    Render {
        /// Contract type to embed
        #[arg(short, long, default_value = "")]
        contract_type: String,

        /// Filenames to list, in order
        filenames: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value_t = DEFAULT_HOST)]
    pub host: IpAddr,

    /// Shared API key expected as `Authorization: Bearer <key>`
    #[arg(long, env = "NEXT_PUBLIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Full endpoint URL; only its path is used for the route
    #[arg(long, env = "NEXT_PUBLIC_API_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Route path, overrides the path derived from --endpoint
    #[arg(long, env = "SOW_ROUTE_PATH")]
    pub route_path: Option<String>,

    /// Env file consulted for the key and endpoint when they are not set
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}

impl ServeArgs {
    /// Resolve the service configuration, reading the env file if present
    pub fn resolve(self) -> Result<ServiceConfig> {
        let env_file = EnvFile::load_optional(&self.env_file)?;
        if let Some(path) = env_file.path() {
            tracing::info!(path = %path.display(), entries = env_file.len(), "Loaded env file");
        }

        let sources = ConfigSources {
            host: Some(self.host),
            port: Some(self.port),
            api_key: self.api_key,
            endpoint: self.endpoint,
            route_path: self.route_path,
        };

        ServiceConfig::resolve(sources, &env_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "sow-api",
            "render",
            "--contract-type",
            "NDA",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                contract_type,
                filenames,
            } => {
                assert_eq!(contract_type, "NDA");
                assert_eq!(filenames, vec!["a.pdf", "b.pdf"]);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_serve_resolves_explicit_flags() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join("absent.env");
        let cli = Cli::try_parse_from([
            "sow-api",
            "serve",
            "--port",
            "9001",
            "--api-key",
            "flag-key",
            "--route-path",
            "/generate_sow",
            "--env-file",
            env_file.to_str().unwrap(),
        ])
        .unwrap();

        let Commands::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.listen_port, 9001);
        assert_eq!(config.route_path, "/generate_sow");
        assert_eq!(config.api_key.expose_secret(), "flag-key");
    }

    #[test]
    fn test_serve_reads_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env.local");
        std::fs::write(
            &env_file,
            "NEXT_PUBLIC_API_KEY=file-key\nNEXT_PUBLIC_API_ENDPOINT=http://localhost:8000/from_file\n",
        )
        .unwrap();

        // Built directly so exported NEXT_PUBLIC_* / SOW_* variables cannot
        // take precedence over the file.
        let args = ServeArgs {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST,
            api_key: Some("flag-key".to_string()),
            endpoint: None,
            route_path: None,
            env_file,
        };

        let config = args.resolve().unwrap();
        assert_eq!(config.api_key.expose_secret(), "flag-key");
        assert_eq!(config.route_path, "/from_file");
    }

    #[test]
    fn test_serve_rejects_capture_in_env_file_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env.local");
        std::fs::write(
            &env_file,
            "NEXT_PUBLIC_API_KEY=file-key\nNEXT_PUBLIC_API_ENDPOINT=http://localhost:8000/files/*\n",
        )
        .unwrap();

        let args = ServeArgs {
            port: DEFAULT_PORT,
            host: DEFAULT_HOST,
            api_key: None,
            endpoint: None,
            route_path: None,
            env_file,
        };

        let err = args.resolve().unwrap_err();
        assert!(matches!(err, crate::error::ConfigError::InvalidRoutePath(_)));
    }
}

//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # Host, port, TLS, shutdown
//! ├── middleware: MiddlewareConfig # CORS, body limit, OpenAPI, timeouts
//! └── service: ServiceConfig       # Object-store backend
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! unzipd --port 8080 --storage-backend fs --storage-root /var/lib/unzipd
//!
//! # Or via environment variables
//! PORT=8080 STORAGE_BACKEND=fs STORAGE_ROOT=/var/lib/unzipd unzipd
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::{Context, bail};
use clap::Parser;
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use unzipd_server::service::ServiceConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Upper bound for the request timeout in seconds.
const MAX_REQUEST_TIMEOUT: u64 = 3600;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "unzipd")]
#[command(about = "Password-protected ZIP extraction over HTTP")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, body limit, OpenAPI, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Object-store configuration for `fileId` requests.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so its values
    /// act as defaults for clap's `env` lookups.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;

        let request_timeout = self.middleware.recovery.request_timeout;
        if request_timeout == 0 || request_timeout > MAX_REQUEST_TIMEOUT {
            bail!(
                "Request timeout {request_timeout} seconds is invalid. \
                Must be between 1 and {MAX_REQUEST_TIMEOUT} seconds."
            );
        }

        if self.middleware.body_limit.max_body_size == 0 {
            bail!("Maximum body size must be greater than zero");
        }

        self.service
            .storage_config()
            .context("invalid storage configuration")?;

        Ok(())
    }

    /// Logs configuration at info level (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            backend = ?self.service.storage_backend,
            root = ?self.service.storage_root,
            bucket = ?self.service.storage_bucket,
            region = ?self.service.storage_region,
            endpoint = ?self.service.storage_endpoint,
            "Storage configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "tls").then_some("tls"),
            cfg!(feature = "dotenv").then_some("dotenv"),
            cfg!(feature = "fs").then_some("fs"),
            cfg!(feature = "s3").then_some("s3"),
            cfg!(feature = "gcs").then_some("gcs"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["unzipd"])?;

        assert_eq!(cli.server.port, 10000);
        assert!(cli.server.binds_to_all_interfaces());
        assert!(!cli.middleware.openapi.enabled);
        assert_eq!(cli.middleware.recovery.request_timeout, 300);
        assert_eq!(cli.middleware.body_limit.max_body_size, 64 * 1024 * 1024);
        assert!(cli.service.storage_backend.is_none());
        cli.validate()?;
        Ok(())
    }

    #[test]
    fn parses_flags() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "unzipd",
            "--port",
            "8080",
            "--openapi",
            "--storage-backend",
            "memory",
        ])?;

        assert_eq!(cli.server.port, 8080);
        assert!(cli.middleware.openapi.enabled);
        assert!(cli.service.storage_backend.is_some());
        cli.validate()?;
        Ok(())
    }

    #[test]
    fn rejects_zero_request_timeout() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["unzipd", "--request-timeout", "0"])?;
        assert!(cli.validate().is_err());
        Ok(())
    }

    #[test]
    fn rejects_incomplete_storage() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["unzipd", "--storage-backend", "fs"])?;
        assert!(cli.validate().is_err());
        Ok(())
    }
}

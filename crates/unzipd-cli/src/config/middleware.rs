//! Command-line view of the `unzipd-server` middleware settings.
//!
//! ```bash
//! unzipd --cors-origins "https://example.com" --request-timeout 60 --max-body-size 16777216
//! ```

use clap::Args;
use serde::{Deserialize, Serialize};
use unzipd_server::middleware::{BodyLimitConfig, CorsConfig, OpenApiConfig, RecoveryConfig};

use crate::TRACING_TARGET_CONFIG;

/// Settings for the layers wrapped around the router.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Upper bound on the JSON body, so on the base64 archive it carries.
    #[clap(flatten)]
    pub body_limit: BodyLimitConfig,

    /// Docs are served only with `--openapi`.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Request deadline; panics are always caught.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Emits one `info` event describing the middleware stack.
    pub fn log(&self) {
        let openapi = self
            .openapi
            .enabled
            .then_some(self.openapi.open_api_json.as_str());

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            cors_origins = ?self.cors.allowed_origins,
            cors_credentials = self.cors.allow_credentials,
            max_body_size = self.body_limit.max_body_size,
            request_timeout_secs = self.recovery.request_timeout,
            openapi = ?openapi,
            "Middleware configuration"
        );
    }
}

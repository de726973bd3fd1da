//! Startup and shutdown logging around the serve future.

use std::future::Future;
use std::io;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::server::{ServerError, ServerResult};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Awaits the server future produced by `serve_fn` and reports how it ended.
///
/// # Errors
///
/// Returns [`ServerError::Runtime`] when the server stops with an I/O error.
pub async fn serve_with_shutdown<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> ServerResult<()>
where
    F: Future<Output = io::Result<()>>,
{
    let addr = server_config.server_addr();
    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            %addr,
            "Listening on every interface; archives are accepted from any reachable client"
        );
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        %addr,
        tls = server_config.is_tls_enabled(),
        "Accepting POST /unzip"
    );

    let started = Instant::now();
    let outcome = serve_fn().await.map_err(ServerError::Runtime);
    let uptime_secs = started.elapsed().as_secs();

    match &outcome {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "Server stopped"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            %error,
            code = error.error_code(),
            suggestion = error.suggestion(),
            uptime_secs,
            "Server stopped with an error"
        ),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_with_shutdown_success() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn serve_with_shutdown_handles_error() {
        let config = ServerConfig::default();
        let result =
            serve_with_shutdown(&config, || async { Err(io::Error::other("test error")) }).await;

        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }
}

//! Request deadline and panic recovery.

use std::any::Any;
use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower::timeout::TimeoutLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::catch_panic::CatchPanicLayer;

use crate::handler::ErrorKind;

/// Tracing target for failures surfaced by the middleware stack.
const TRACING_TARGET: &str = "unzipd_server::middleware::recovery";

/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT: u64 = 300;

/// Limits applied to every request before it reaches a handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct RecoveryConfig {
    /// Seconds a request may run (including extraction) before it is aborted
    /// with a 500.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT)
    )]
    pub request_timeout: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl RecoveryConfig {
    /// Builds a configuration that aborts requests after `secs` seconds.
    pub fn with_timeout_secs(secs: u64) -> Self {
        Self {
            request_timeout: secs,
        }
    }

    #[inline]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Adds panic catching and a request deadline to a [`Router`].
pub trait RouterRecoveryExt<S> {
    /// Panics, elapsed deadlines and any other middleware failure are
    /// answered with a JSON `internal_server_error` body.
    fn with_recovery(self, config: &RecoveryConfig) -> Self;

    /// Same as [`with_recovery`](Self::with_recovery) using [`RecoveryConfig::default`].
    fn with_default_recovery(self) -> Self;
}

impl<S> RouterRecoveryExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_recovery(self, config: &RecoveryConfig) -> Self {
        let stack = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(recover_from_error))
            .layer(CatchPanicLayer::custom(recover_from_panic))
            .layer(TimeoutLayer::new(config.request_timeout()));

        self.layer(stack)
    }

    fn with_default_recovery(self) -> Self {
        self.with_recovery(&RecoveryConfig::default())
    }
}

async fn recover_from_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::error!(target: TRACING_TARGET, error = %err, "request deadline elapsed");
        return ErrorKind::InternalServerError
            .with_message("Request timeout")
            .with_context("Request exceeded the configured deadline and was aborted")
            .into_response();
    }

    tracing::error!(target: TRACING_TARGET, error = %err, "middleware failure");
    ErrorKind::InternalServerError.into_response()
}

fn recover_from_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match payload.downcast_ref::<String>() {
        Some(text) => text.as_str(),
        None => payload.downcast_ref::<&str>().copied().unwrap_or("<non-string payload>"),
    };
    tracing::error!(target: TRACING_TARGET, panic = %detail, "handler panicked");

    ErrorKind::InternalServerError
        .with_message("An unexpected panic occurred")
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "done"
    }

    async fn panics() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn timeout_becomes_internal_error() -> anyhow::Result<()> {
        let app: Router = Router::new()
            .route("/slow", get(slow))
            .with_recovery(&RecoveryConfig::with_timeout_secs(0));
        let server = TestServer::new(app)?;

        let response = server.get("/slow").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "internal_server_error");
        assert_eq!(body["error"], "Request timeout");
        Ok(())
    }

    #[tokio::test]
    async fn panic_becomes_internal_error() -> anyhow::Result<()> {
        let app: Router = Router::new()
            .route("/panic", get(panics))
            .with_default_recovery();
        let server = TestServer::new(app)?;

        let response = server.get("/panic").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"], "An unexpected panic occurred");
        Ok(())
    }
}

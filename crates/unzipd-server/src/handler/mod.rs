//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use unzipd_server::handler::router;
//! use unzipd_server::middleware::OpenApiConfig;
//! use unzipd_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let state = ServiceState::from_config(&ServiceConfig::default())?;
//! let app = router(state, &OpenApiConfig::default());
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod request;
mod response;
mod unzip;

use aide::axum::ApiRouter;
use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::UnzipRequest;
pub use crate::handler::response::{ErrorResponse, UnzipFile, UnzipResponse};
use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
use crate::service::ServiceState;

#[inline]
async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes.
pub fn routes() -> ApiRouter<ServiceState> {
    ApiRouter::new().merge(unzip::routes())
}

/// Returns the finished [`Router`]: all routes, optional documentation and a
/// JSON 404 for everything else.
pub fn router(state: ServiceState, open_api: &OpenApiConfig) -> Router {
    routes()
        .with_open_api(open_api)
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test {
    use axum_test::TestServer;

    use crate::handler::router;
    use crate::middleware::{OpenApiConfig, RouterSecurityExt};
    use crate::service::{ArchiveStore, ServiceState};

    /// Returns a new [`TestServer`] with the default router and the given state.
    pub fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let app = router(state, &OpenApiConfig::default()).with_default_security();
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] without an object store.
    pub fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_state(ServiceState::with_store(ArchiveStore::disabled()))
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/healthz").await;
        response.assert_status_not_found();

        let body = response.json::<serde_json::Value>();
        assert_eq!(body["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn documentation_is_off_by_default() -> anyhow::Result<()> {
        let server = create_test_server()?;
        server.get("/api/openapi.json").await.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn documentation_can_be_enabled() -> anyhow::Result<()> {
        let state = ServiceState::with_store(ArchiveStore::disabled());
        let server = TestServer::new(router(state, &OpenApiConfig::enabled()))?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();

        let body = response.json::<serde_json::Value>();
        assert!(body["paths"]["/unzip"]["post"].is_object());
        Ok(())
    }
}

//! Middleware for `axum::Router` and HTTP request processing.
//!
//! Each concern is exposed as a router extension trait:
//! - [`RouterSecurityExt`]: CORS, body size limit, compression, security headers
//! - [`RouterObservabilityExt`]: request ids, tracing spans, request timing
//! - [`RouterRecoveryExt`]: panic recovery and request timeouts
//! - [`RouterOpenApiExt`]: optional OpenAPI JSON and Scalar UI
//!
//! ```rust,no_run
//! use axum::Router;
//! use unzipd_server::middleware::{
//!     BodyLimitConfig, CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//!     RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default(), &BodyLimitConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;
mod specification;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{BodyLimitConfig, CorsConfig, RouterSecurityExt};
pub use specification::{OpenApiConfig, RouterOpenApiExt};

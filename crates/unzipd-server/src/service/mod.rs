//! Application state and dependency injection.

mod config;
mod source;
mod state;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder, StorageKind};
pub use crate::service::source::{ArchiveSource, ArchiveStore, decode_archive};
pub use crate::service::state::ServiceState;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

//! Application state and dependency injection.

use unzipd_archive::ArchiveExtractor;

use crate::service::{ArchiveStore, Result, ServiceConfig};

/// Application state.
///
/// Built once at startup and shared read-only by every request. Used for the
/// [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    archive_store: ArchiveStore,
    archive_extractor: ArchiveExtractor,
}

impl ServiceState {
    /// Initializes application state from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let service_state = Self {
            archive_store: config.connect_storage()?,
            archive_extractor: ArchiveExtractor::new(),
        };

        Ok(service_state)
    }

    /// Creates state around an already-initialized store.
    pub fn with_store(archive_store: ArchiveStore) -> Self {
        Self {
            archive_store,
            archive_extractor: ArchiveExtractor::new(),
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(archive_store: ArchiveStore);
impl_di!(archive_extractor: ArchiveExtractor);

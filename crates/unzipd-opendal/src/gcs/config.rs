//! Google Cloud Storage configuration.

use serde::{Deserialize, Serialize};

/// Google Cloud Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcsConfig {
    /// Bucket name.
    pub bucket: String,
    /// Path to a service-account JSON key file.
    ///
    /// When unset, OpenDAL falls back to `GOOGLE_APPLICATION_CREDENTIALS` and
    /// the metadata server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_path: Option<String>,
    /// Key prefix that `fileId` values are resolved under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl GcsConfig {
    /// Creates a new GCS configuration.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            credential_path: None,
            root: None,
        }
    }

    /// Sets the service-account credential file.
    pub fn with_credential_path(mut self, path: impl Into<String>) -> Self {
        self.credential_path = Some(path.into());
        self
    }

    /// Sets the key prefix.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }
}

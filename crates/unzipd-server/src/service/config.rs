use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use unzipd_opendal::{FsConfig, GcsConfig, S3Config, StorageBackend, StorageConfig};

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};

use crate::service::{ArchiveStore, Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Default AWS region for S3 when none is configured.
    pub const S3_REGION: &str = "us-east-1";
}

/// Object-store backend selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// In-process map, empty at startup.
    Memory,
    /// Local filesystem directory.
    Fs,
    /// Amazon S3 or an S3-compatible endpoint.
    S3,
    /// Google Cloud Storage.
    Gcs,
}

/// App [`state`] configuration.
///
/// Without a `storage_backend` only inline `filedata` requests can be served.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Default, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Object-store backend used to resolve `fileId` references.
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_BACKEND", value_enum))]
    #[builder(default)]
    pub storage_backend: Option<StorageKind>,

    /// Root directory (fs) or key prefix (s3, gcs).
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_ROOT"))]
    #[builder(default)]
    pub storage_root: Option<String>,

    /// Bucket name (s3, gcs).
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_BUCKET"))]
    #[builder(default)]
    pub storage_bucket: Option<String>,

    /// Bucket region (s3).
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_REGION"))]
    #[builder(default)]
    pub storage_region: Option<String>,

    /// Custom endpoint for S3-compatible storage.
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_ENDPOINT"))]
    #[builder(default)]
    pub storage_endpoint: Option<String>,

    /// Access key ID (s3).
    #[cfg_attr(feature = "config", arg(long, env = "STORAGE_ACCESS_KEY_ID"))]
    #[builder(default)]
    pub storage_access_key_id: Option<String>,

    /// Secret access key (s3).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "STORAGE_SECRET_ACCESS_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing)]
    #[builder(default)]
    pub storage_secret_access_key: Option<String>,

    /// Service-account JSON key file (gcs).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")
    )]
    #[builder(default)]
    pub storage_credential_path: Option<String>,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = self.storage_secret_access_key.as_ref().map(|_| "<redacted>");

        f.debug_struct("ServiceConfig")
            .field("storage_backend", &self.storage_backend)
            .field("storage_root", &self.storage_root)
            .field("storage_bucket", &self.storage_bucket)
            .field("storage_region", &self.storage_region)
            .field("storage_endpoint", &self.storage_endpoint)
            .field("storage_access_key_id", &self.storage_access_key_id)
            .field("storage_secret_access_key", &secret)
            .field("storage_credential_path", &self.storage_credential_path)
            .finish()
    }
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Builds the object-store configuration, if a backend is selected.
    pub fn storage_config(&self) -> Result<Option<StorageConfig>> {
        let Some(kind) = self.storage_backend else {
            return Ok(None);
        };

        let config = match kind {
            StorageKind::Memory => StorageConfig::Memory,
            StorageKind::Fs => {
                let root = self
                    .storage_root
                    .clone()
                    .ok_or_else(|| Error::config("STORAGE_ROOT is required for the fs backend"))?;
                StorageConfig::Fs(FsConfig::new(root))
            }
            StorageKind::S3 => {
                let bucket = self.require_bucket("s3")?;
                let region = self
                    .storage_region
                    .clone()
                    .unwrap_or_else(|| defaults::S3_REGION.to_owned());

                let mut s3 = S3Config::new(bucket, region);
                if let Some(endpoint) = &self.storage_endpoint {
                    s3 = s3.with_endpoint(endpoint);
                }
                if let (Some(key_id), Some(secret)) =
                    (&self.storage_access_key_id, &self.storage_secret_access_key)
                {
                    s3 = s3.with_credentials(key_id, secret);
                }
                if let Some(root) = &self.storage_root {
                    s3 = s3.with_root(root);
                }
                StorageConfig::S3(s3)
            }
            StorageKind::Gcs => {
                let mut gcs = GcsConfig::new(self.require_bucket("gcs")?);
                if let Some(path) = &self.storage_credential_path {
                    gcs = gcs.with_credential_path(path);
                }
                if let Some(root) = &self.storage_root {
                    gcs = gcs.with_root(root);
                }
                StorageConfig::Gcs(gcs)
            }
        };

        Ok(Some(config))
    }

    /// Connects to the configured object store.
    pub fn connect_storage(&self) -> Result<ArchiveStore> {
        match self.storage_config()? {
            Some(config) => {
                let backend = StorageBackend::new(config).map_err(|e| {
                    Error::storage("Failed to initialize object store").with_source(e)
                })?;
                Ok(ArchiveStore::new(backend))
            }
            None => Ok(ArchiveStore::disabled()),
        }
    }

    fn require_bucket(&self, backend: &str) -> Result<String> {
        self.storage_bucket
            .clone()
            .ok_or_else(|| Error::config(format!("STORAGE_BUCKET is required for the {backend} backend")))
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        if let Some(Some(bucket)) = &builder.storage_bucket
            && bucket.is_empty()
        {
            return Err("Storage bucket cannot be empty".to_string());
        }

        if let Some(Some(root)) = &builder.storage_root
            && root.is_empty()
        {
            return Err("Storage root cannot be empty".to_string());
        }

        Ok(())
    }
}

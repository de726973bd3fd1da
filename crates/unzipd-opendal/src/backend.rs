//! Storage backend implementation.

use opendal::{Operator, services};

use crate::TRACING_TARGET;
use crate::config::{BackendType, StorageConfig};
use crate::error::{StorageError, StorageResult};

/// Unified storage backend that wraps an OpenDAL operator.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    pub fn new(config: StorageConfig) -> StorageResult<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = %config.backend_type(),
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Creates an in-memory backend.
    pub fn memory() -> StorageResult<Self> {
        Self::new(StorageConfig::Memory)
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Returns the backend type.
    pub fn backend_type(&self) -> BackendType {
        self.config.backend_type()
    }

    /// Reads an object from storage.
    pub async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let path = Self::validate_path(path)?;

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "Reading object"
        );

        let data = self.operator.read(path).await?.to_vec();

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Object read complete"
        );

        Ok(data)
    }

    /// Writes an object to storage.
    pub async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let path = Self::validate_path(path)?;

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "Writing object"
        );

        self.operator.write(path, data).await?;
        Ok(())
    }

    /// Rejects keys that are empty, name a directory, or walk out of the root.
    fn validate_path(path: &str) -> StorageResult<&str> {
        let trimmed = path.trim_start_matches('/');

        if trimmed.is_empty() || trimmed.ends_with('/') {
            return Err(StorageError::invalid_path(format!(
                "'{path}' does not name an object"
            )));
        }

        if trimmed.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(StorageError::invalid_path(format!(
                "'{path}' escapes the storage root"
            )));
        }

        Ok(trimmed)
    }

    /// Creates an OpenDAL operator based on configuration.
    #[allow(unreachable_patterns)]
    fn create_operator(config: &StorageConfig) -> StorageResult<Operator> {
        match config {
            StorageConfig::Memory => Operator::new(services::Memory::default())
                .map(|op| op.finish())
                .map_err(|e| StorageError::init(e.to_string())),

            #[cfg(feature = "fs")]
            StorageConfig::Fs(fs) => {
                let builder = services::Fs::default().root(&fs.root);

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "s3")]
            StorageConfig::S3(s3) => {
                let mut builder = services::S3::default()
                    .bucket(&s3.bucket)
                    .region(&s3.region);

                if let Some(ref root) = s3.root {
                    builder = builder.root(root);
                }

                if let Some(ref endpoint) = s3.endpoint {
                    builder = builder.endpoint(endpoint);
                }

                if let Some(ref credentials) = s3.credentials {
                    builder = builder
                        .access_key_id(&credentials.access_key_id)
                        .secret_access_key(&credentials.secret_access_key);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            #[cfg(feature = "gcs")]
            StorageConfig::Gcs(gcs) => {
                let mut builder = services::Gcs::default().bucket(&gcs.bucket);

                if let Some(ref root) = gcs.root {
                    builder = builder.root(root);
                }

                if let Some(ref credential_path) = gcs.credential_path {
                    builder = builder.credential_path(credential_path);
                }

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StorageError::init(e.to_string()))
            }

            // Reached when the backend's cargo feature is disabled.
            _ => Err(StorageError::init(format!(
                "Backend type {} is not supported with current features",
                config.backend_type()
            ))),
        }
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend_type", &self.config.backend_type())
            .finish()
    }
}

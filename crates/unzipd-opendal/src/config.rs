//! Storage configuration types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gcs::GcsConfig;
use crate::s3::S3Config;

/// Storage backend kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// In-process map.
    Memory,
    /// Local filesystem directory.
    Fs,
    /// Amazon S3 compatible storage.
    S3,
    /// Google Cloud Storage.
    Gcs,
}

impl BackendType {
    /// Returns the backend name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Fs => "fs",
            Self::S3 => "s3",
            Self::Gcs => "gcs",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local filesystem configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Directory archives are read from.
    pub root: String,
}

impl FsConfig {
    /// Creates a new filesystem configuration.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum StorageConfig {
    /// In-process map.
    Memory,
    /// Local filesystem directory.
    Fs(FsConfig),
    /// Amazon S3 compatible storage.
    S3(S3Config),
    /// Google Cloud Storage.
    Gcs(GcsConfig),
}

impl StorageConfig {
    /// Returns the backend kind.
    pub fn backend_type(&self) -> BackendType {
        match self {
            Self::Memory => BackendType::Memory,
            Self::Fs(_) => BackendType::Fs,
            Self::S3(_) => BackendType::S3,
            Self::Gcs(_) => BackendType::Gcs,
        }
    }

    /// Returns the backend name as a static string.
    pub fn backend_name(&self) -> &'static str {
        self.backend_type().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!(StorageConfig::Memory.backend_name(), "memory");
        assert_eq!(
            StorageConfig::Fs(FsConfig::new("/tmp")).backend_name(),
            "fs"
        );
        assert_eq!(
            StorageConfig::S3(S3Config::new("bucket", "us-east-1")).backend_type(),
            BackendType::S3
        );
    }

    #[test]
    fn tagged_serialization() -> anyhow::Result<()> {
        let config = StorageConfig::Gcs(GcsConfig::new("archives"));
        let value = serde_json::to_value(&config)?;
        assert_eq!(value["type"], "gcs");
        assert_eq!(value["bucket"], "archives");

        let parsed: StorageConfig = serde_json::from_value(value)?;
        assert_eq!(parsed, config);
        Ok(())
    }
}

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod config;
mod error;
mod gcs;
mod s3;

pub use backend::StorageBackend;
pub use config::{BackendType, FsConfig, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use gcs::GcsConfig;
pub use s3::{S3Config, S3Credentials};

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "unzipd_opendal";

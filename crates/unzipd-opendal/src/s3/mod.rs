//! Amazon S3 backend configuration.

mod config;

pub use config::{S3Config, S3Credentials};

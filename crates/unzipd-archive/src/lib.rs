#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod entry;
mod error;
mod extract;
mod integrity;

pub use entry::{ExtractedEntry, Password};
pub use error::{ExtractError, ExtractResult};
pub use extract::ArchiveExtractor;
pub use integrity::IntegrityCheck;

/// Tracing target for archive extraction.
pub const TRACING_TARGET: &str = "unzipd_archive";

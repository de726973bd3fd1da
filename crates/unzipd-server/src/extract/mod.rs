//! Request extractors with JSON error responses.

mod reject;

pub use crate::extract::reject::{Json, ValidateJson};

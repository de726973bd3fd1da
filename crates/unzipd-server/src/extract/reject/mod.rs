//! Request extractors whose rejections render as [`ErrorResponse`] JSON.
//!
//! [`ErrorResponse`]: crate::handler::ErrorResponse

pub mod enhanced_json;
pub mod validated_json;

pub use self::enhanced_json::Json;
pub use self::validated_json::ValidateJson;

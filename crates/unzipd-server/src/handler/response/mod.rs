//! Response types for HTTP handlers.

mod error_response;
mod unzip;

pub use error_response::ErrorResponse;
pub use unzip::{UnzipFile, UnzipResponse};

//! Request types for HTTP handlers.

mod unzip;

pub use unzip::UnzipRequest;

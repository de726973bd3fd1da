//! [`Error`], [`ErrorKind`] and [`Result`].

mod decode_error;
mod extract_error;
mod http_error;
mod storage_error;

pub use http_error::{Error, ErrorKind, Result};

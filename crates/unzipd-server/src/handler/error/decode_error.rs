//! Base64 decode error to HTTP error conversion implementation.

use base64::DecodeError;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for decode error conversions.
const TRACING_TARGET: &str = "unzipd_server::handler::decode";

impl From<DecodeError> for HttpError<'static> {
    fn from(error: DecodeError) -> Self {
        tracing::debug!(
            target: TRACING_TARGET,
            error = %error,
            "Rejected archive data"
        );

        ErrorKind::DecodeError
            .with_message("filedata is not valid base64")
            .with_context(error.to_string())
    }
}

//! Storage error to HTTP error conversion implementation.

use unzipd_opendal::StorageError;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for storage error conversions.
const TRACING_TARGET: &str = "unzipd_server::handler::storage";

impl From<StorageError> for HttpError<'static> {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::InvalidPath(reason) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    reason = %reason,
                    "Rejected archive reference"
                );

                ErrorKind::UpstreamFetchFailure
                    .with_message("fileId does not name a stored archive")
                    .with_context(reason)
            }
            StorageError::NotFound(_) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Archive not found in storage"
                );

                ErrorKind::UpstreamFetchFailure.with_message("Archive not found in storage")
            }
            error => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    temporary = error.is_temporary(),
                    "Failed to fetch archive from storage"
                );

                ErrorKind::UpstreamFetchFailure.into_error()
            }
        }
    }
}

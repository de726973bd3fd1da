//! Extraction error to HTTP error conversion implementation.

use unzipd_archive::ExtractError;

use super::http_error::{Error as HttpError, ErrorKind};

/// Tracing target for extraction error conversions.
const TRACING_TARGET: &str = "unzipd_server::handler::archive";

impl From<ExtractError> for HttpError<'static> {
    fn from(error: ExtractError) -> Self {
        tracing::warn!(
            target: TRACING_TARGET,
            error = %error,
            "Archive extraction failed"
        );

        match error {
            ExtractError::InvalidArchive(reason) => ErrorKind::DecodeError
                .with_message("The data is not a valid zip archive")
                .with_context(reason),

            ExtractError::PasswordRequired { entry } => ErrorKind::DecryptionFailure
                .with_message("The archive is encrypted and no password was supplied")
                .with_context(format!("entry: {entry}")),

            ExtractError::InvalidPassword { entry } => ErrorKind::DecryptionFailure
                .with_message("Incorrect password")
                .with_context(format!("entry: {entry}")),

            ExtractError::Unsupported { entry, reason } => ErrorKind::DecodeError
                .with_message("The archive uses an unsupported feature")
                .with_context(format!("entry: {entry}; {reason}")),

            ExtractError::Corrupted { entry, source } => ErrorKind::DecodeError
                .with_message("The archive is corrupted")
                .with_context(format!("entry: {entry}; {source}")),

            ExtractError::SizeMismatch { expected, actual } => ErrorKind::IntegrityMismatch
                .with_message("size_mismatch")
                .with_context(format!("expected {expected} bytes, got {actual}")),

            ExtractError::DigestMismatch { expected, actual } => ErrorKind::IntegrityMismatch
                .with_message("sha256_mismatch")
                .with_context(format!("expected {expected}, got {actual}")),

            ExtractError::InvalidDigest(digest) => ErrorKind::BadRequest
                .with_message("sha256 must be a 64 character hex string")
                .with_context(digest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decryption_failures() {
        let error = HttpError::from(ExtractError::InvalidPassword {
            entry: "a.txt".into(),
        });
        assert_eq!(error.kind(), ErrorKind::DecryptionFailure);
        assert_eq!(error.context(), Some("entry: a.txt"));

        let error = HttpError::from(ExtractError::PasswordRequired {
            entry: "a.txt".into(),
        });
        assert_eq!(error.kind(), ErrorKind::DecryptionFailure);
    }

    #[test]
    fn structural_failures_are_decode_errors() {
        let error = HttpError::from(ExtractError::InvalidArchive("eocd not found".into()));
        assert_eq!(error.kind(), ErrorKind::DecodeError);

        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "Invalid checksum");
        let error = HttpError::from(ExtractError::Corrupted {
            entry: "a.txt".into(),
            source: io,
        });
        assert_eq!(error.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn integrity_failures() {
        let error = HttpError::from(ExtractError::SizeMismatch {
            expected: 1,
            actual: 2,
        });
        assert_eq!(error.kind(), ErrorKind::IntegrityMismatch);
        assert_eq!(error.message(), Some("size_mismatch"));

        let error = HttpError::from(ExtractError::InvalidDigest("xyz".into()));
        assert_eq!(error.kind(), ErrorKind::BadRequest);
    }
}

//! Extraction error types.

use std::io;

use zip::result::ZipError;

/// Result type for extraction operations.
pub type ExtractResult<T, E = ExtractError> = Result<T, E>;

/// Errors that can occur while verifying or extracting an archive.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The buffer is not a readable ZIP container.
    #[error("not a valid zip archive: {0}")]
    InvalidArchive(String),

    /// An entry is encrypted and no password was supplied.
    #[error("entry '{entry}' is encrypted and no password was supplied")]
    PasswordRequired { entry: String },

    /// The supplied password does not decrypt an entry.
    #[error("incorrect password for entry '{entry}'")]
    InvalidPassword { entry: String },

    /// An entry uses a compression method or feature that cannot be read.
    #[error("entry '{entry}' cannot be read: {reason}")]
    Unsupported { entry: String, reason: String },

    /// An unencrypted entry failed to decompress or failed its checksum.
    #[error("entry '{entry}' is corrupted: {source}")]
    Corrupted {
        entry: String,
        #[source]
        source: io::Error,
    },

    /// The archive length differs from the expected size.
    #[error("archive size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// The archive digest differs from the expected sha256.
    #[error("archive sha256 mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    /// The expected sha256 is not a 64 character hex string.
    #[error("invalid sha256 digest: {0}")]
    InvalidDigest(String),
}

impl ExtractError {
    /// Maps a zip error raised while opening or reading `entry`.
    pub(crate) fn from_zip(entry: &str, error: ZipError) -> Self {
        match error {
            ZipError::InvalidPassword { .. } => Self::InvalidPassword {
                entry: entry.to_owned(),
            },
            ZipError::UnsupportedArchive(reason) if reason == ZipError::PASSWORD_REQUIRED => {
                Self::PasswordRequired {
                    entry: entry.to_owned(),
                }
            }
            ZipError::UnsupportedArchive(reason) => Self::Unsupported {
                entry: entry.to_owned(),
                reason: reason.to_string(),
            },
            ZipError::Io(source) => Self::Corrupted {
                entry: entry.to_owned(),
                source,
            },
            other => Self::Unsupported {
                entry: entry.to_owned(),
                reason: other.to_string(),
            },
        }
    }

    /// Returns true when the password was wrong or missing.
    #[must_use]
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            Self::PasswordRequired { .. } | Self::InvalidPassword { .. }
        )
    }

    /// Returns true when the archive failed a size or digest check.
    #[must_use]
    pub fn is_integrity_failure(&self) -> bool {
        matches!(
            self,
            Self::SizeMismatch { .. } | Self::DigestMismatch { .. } | Self::InvalidDigest(_)
        )
    }

    /// Returns the name of the entry that failed, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&str> {
        match self {
            Self::PasswordRequired { entry }
            | Self::InvalidPassword { entry }
            | Self::Unsupported { entry, .. }
            | Self::Corrupted { entry, .. } => Some(entry),
            _ => None,
        }
    }
}

impl From<ZipError> for ExtractError {
    fn from(error: ZipError) -> Self {
        Self::InvalidArchive(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_password_is_decryption_failure() {
        let error = ExtractError::from_zip("a.txt", ZipError::InvalidPassword);
        assert!(error.is_decryption_failure());
        assert_eq!(error.entry(), Some("a.txt"));
    }

    #[test]
    fn password_required_is_decryption_failure() {
        let error = ExtractError::from_zip(
            "a.txt",
            ZipError::UnsupportedArchive(ZipError::PASSWORD_REQUIRED),
        );
        assert!(matches!(error, ExtractError::PasswordRequired { .. }));
        assert!(error.is_decryption_failure());
    }

    #[test]
    fn io_error_is_corruption() {
        let io = io::Error::new(io::ErrorKind::InvalidData, "Invalid checksum");
        let error = ExtractError::from_zip("a.txt", ZipError::Io(io));
        assert!(matches!(error, ExtractError::Corrupted { .. }));
        assert!(!error.is_decryption_failure());
    }

    #[test]
    fn integrity_failures() {
        let error = ExtractError::SizeMismatch {
            expected: 1,
            actual: 2,
        };
        assert!(error.is_integrity_failure());
        assert!(error.entry().is_none());
        assert!(!ExtractError::InvalidArchive("eof".into()).is_integrity_failure());
    }
}

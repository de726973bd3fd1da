//! Size and digest verification of raw archive bytes.

use sha2::{Digest, Sha256};

use crate::{ExtractError, ExtractResult, TRACING_TARGET};

/// Expected properties of an archive, checked before it is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityCheck {
    /// Expected length of the archive in bytes.
    pub size: Option<u64>,
    /// Expected lowercase or uppercase hex sha256 of the archive.
    pub sha256: Option<String>,
}

impl IntegrityCheck {
    /// Creates a check from optional expectations.
    pub fn new(size: Option<u64>, sha256: Option<String>) -> Self {
        Self { size, sha256 }
    }

    /// Returns true when there is nothing to verify.
    pub fn is_empty(&self) -> bool {
        self.size.is_none() && self.sha256.is_none()
    }

    /// Verifies `bytes` against every configured expectation.
    pub fn verify(&self, bytes: &[u8]) -> ExtractResult<()> {
        if let Some(expected) = self.size {
            let actual = bytes.len() as u64;
            if actual != expected {
                return Err(ExtractError::SizeMismatch { expected, actual });
            }
        }

        if let Some(expected) = self.sha256.as_deref() {
            let expected = expected.trim().to_ascii_lowercase();
            if expected.len() != 64 || hex::decode(&expected).is_err() {
                return Err(ExtractError::InvalidDigest(expected));
            }

            let actual = hex::encode(Sha256::digest(bytes));
            if actual != expected {
                return Err(ExtractError::DigestMismatch { expected, actual });
            }
        }

        tracing::trace!(
            target: TRACING_TARGET,
            size = bytes.len(),
            "archive integrity verified"
        );

        Ok(())
    }
}

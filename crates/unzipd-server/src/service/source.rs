//! Resolution of archive sources to raw bytes.

use base64::Engine;
use base64::alphabet::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use unzipd_opendal::StorageBackend;

use crate::handler::{ErrorKind, Result};

/// Tracing target for archive resolution.
const TRACING_TARGET: &str = "unzipd_server::service::source";

/// Standard alphabet that accepts input with or without padding.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Where the archive bytes of a request come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveSource<'a> {
    /// Base64 archive carried in the request body.
    Inline(&'a str),
    /// Key of an archive in the object store.
    Stored(&'a str),
}

/// Decodes inline base64 archive data, ignoring ASCII whitespace.
pub fn decode_archive(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    if data.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: Vec<u8> = data
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        return LENIENT_STANDARD.decode(compact);
    }

    LENIENT_STANDARD.decode(data)
}

/// Read-only handle on the optional object store.
#[derive(Debug, Clone, Default)]
pub struct ArchiveStore {
    backend: Option<StorageBackend>,
}

impl ArchiveStore {
    /// Creates a store backed by `backend`.
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a store that rejects every reference.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Returns true when an object store is configured.
    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Returns the underlying backend, if any.
    pub fn backend(&self) -> Option<&StorageBackend> {
        self.backend.as_ref()
    }

    /// Fetches the archive stored under `file_id`.
    pub async fn fetch(&self, file_id: &str) -> Result<Vec<u8>> {
        let Some(backend) = self.backend.as_ref() else {
            tracing::error!(
                target: TRACING_TARGET,
                "fileId supplied but no object store is configured"
            );
            return Err(ErrorKind::InternalServerError
                .with_message("Archive storage is not configured"));
        };

        Ok(backend.read(file_id).await?)
    }

    /// Resolves `source` to raw archive bytes.
    pub async fn resolve(&self, source: ArchiveSource<'_>) -> Result<Vec<u8>> {
        match source {
            ArchiveSource::Inline(data) => Ok(decode_archive(data)?),
            ArchiveSource::Stored(file_id) => self.fetch(file_id).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_padded_and_unpadded() -> anyhow::Result<()> {
        assert_eq!(decode_archive("aGVsbG8=")?, b"hello");
        assert_eq!(decode_archive("aGVsbG8")?, b"hello");
        Ok(())
    }

    #[test]
    fn ignores_whitespace() -> anyhow::Result<()> {
        assert_eq!(decode_archive("aGVs\nbG8=\r\n")?, b"hello");
        assert_eq!(decode_archive(" aGVs bG8= ")?, b"hello");
        Ok(())
    }

    #[test]
    fn rejects_invalid_alphabet() {
        assert!(decode_archive("aGVs*bG8=").is_err());
        assert!(decode_archive("aGVsbG8-").is_err());
    }

    #[tokio::test]
    async fn disabled_store_is_server_error() {
        let error = ArchiveStore::disabled().fetch("a.zip").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[tokio::test]
    async fn resolves_stored_archive() -> anyhow::Result<()> {
        let backend = StorageBackend::memory()?;
        backend.write("a.zip", b"PK".to_vec()).await?;
        let store = ArchiveStore::new(backend);

        assert!(store.is_enabled());
        assert_eq!(store.resolve(ArchiveSource::Stored("a.zip")).await?, b"PK");
        assert_eq!(store.resolve(ArchiveSource::Inline("UEs=")).await?, b"PK");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_reference_is_upstream_failure() -> anyhow::Result<()> {
        let store = ArchiveStore::new(StorageBackend::memory()?);
        let error = store.fetch("missing.zip").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UpstreamFetchFailure);
        Ok(())
    }
}

//! Extraction request types.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unzipd_archive::{IntegrityCheck, Password};
use validator::Validate;

use crate::handler::{ErrorKind, Result};
use crate::service::ArchiveSource;

/// Request body of `POST /unzip`.
///
/// Exactly one of `filedata` and `fileId` must be present. Empty strings are
/// treated as absent.
#[derive(Clone, Default, Serialize, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnzipRequest {
    /// Base64-encoded ZIP archive (standard alphabet, padding optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filedata: Option<String>,
    /// Key of an archive in the configured object store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1024))]
    pub file_id: Option<String>,
    /// Password for ZipCrypto or AES encrypted entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1024))]
    pub password: Option<String>,
    /// Expected hex sha256 of the archive bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(equal = 64))]
    pub sha256: Option<String>,
    /// Expected length of the archive in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl UnzipRequest {
    /// Creates a request for inline archive data.
    pub fn inline(filedata: impl Into<String>) -> Self {
        Self {
            filedata: Some(filedata.into()),
            ..Self::default()
        }
    }

    /// Creates a request for a stored archive.
    pub fn stored(file_id: impl Into<String>) -> Self {
        Self {
            file_id: Some(file_id.into()),
            ..Self::default()
        }
    }

    /// Sets the password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Returns where the archive bytes come from.
    pub fn source(&self) -> Result<ArchiveSource<'_>> {
        let filedata = self.filedata.as_deref().filter(|data| !data.is_empty());
        let file_id = self.file_id.as_deref().filter(|id| !id.is_empty());

        match (filedata, file_id) {
            (Some(data), None) => Ok(ArchiveSource::Inline(data)),
            (None, Some(id)) => Ok(ArchiveSource::Stored(id)),
            (Some(_), Some(_)) => Err(ErrorKind::MissingInput
                .with_message("Provide either filedata or fileId, not both")),
            (None, None) => Err(ErrorKind::MissingInput.into_error()),
        }
    }

    /// Returns the password, treating an empty string as absent.
    pub fn password(&self) -> Option<Password> {
        self.password.clone().and_then(Password::new)
    }

    /// Returns the integrity expectations on the archive bytes.
    pub fn integrity_check(&self) -> IntegrityCheck {
        IntegrityCheck::new(self.size, self.sha256.clone())
    }
}

impl fmt::Debug for UnzipRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnzipRequest")
            .field("filedata_len", &self.filedata.as_ref().map(String::len))
            .field("file_id", &self.file_id)
            .field("has_password", &self.password().is_some())
            .field("sha256", &self.sha256)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case() -> anyhow::Result<()> {
        let request: UnzipRequest = serde_json::from_value(serde_json::json!({
            "fileId": "archives/a.zip",
            "password": "secret",
        }))?;

        assert_eq!(request.file_id.as_deref(), Some("archives/a.zip"));
        assert!(matches!(
            request.source(),
            Ok(ArchiveSource::Stored("archives/a.zip"))
        ));
        assert!(request.password().is_some());
        Ok(())
    }

    #[test]
    fn missing_source() {
        let error = UnzipRequest::default().source().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingInput);

        let error = UnzipRequest::inline("").source().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn ambiguous_source() {
        let request = UnzipRequest {
            filedata: Some("UEsFBg==".into()),
            file_id: Some("a.zip".into()),
            ..UnzipRequest::default()
        };

        let error = request.source().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn empty_password_is_absent() {
        let request = UnzipRequest::inline("UEsFBg==").with_password("");
        assert!(request.password().is_none());
        assert!(format!("{request:?}").contains("has_password: false"));
    }

    #[test]
    fn debug_hides_secrets() {
        let request = UnzipRequest::inline("UEsFBg==").with_password("hunter2");
        let debug = format!("{request:?}");

        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("UEsFBg=="));
    }

    #[test]
    fn validates_digest_length() {
        let request = UnzipRequest {
            sha256: Some("abc".into()),
            ..UnzipRequest::inline("UEsFBg==")
        };
        assert!(request.validate().is_err());
    }
}

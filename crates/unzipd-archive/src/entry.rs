//! Extracted entries and archive passwords.

use std::fmt;

use derive_more::{From, Into};

/// A file entry read out of an archive.
///
/// Directories are never represented. The name is the path exactly as stored
/// in the archive's central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// Entry path as stored in the archive.
    pub name: String,
    /// Decrypted, decompressed contents.
    pub data: Vec<u8>,
}

impl ExtractedEntry {
    /// Creates a new entry.
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Returns the decompressed size in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Password used to decrypt ZipCrypto or AES entries.
///
/// The value is redacted from `Debug` output so it never reaches logs.
#[derive(Clone, PartialEq, Eq, From, Into)]
pub struct Password(String);

impl Password {
    /// Returns a password, or `None` when the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }

    /// Returns the raw password bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

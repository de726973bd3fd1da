//! Extraction response types.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unzipd_archive::ExtractedEntry;

/// A single extracted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnzipFile {
    /// Entry path exactly as stored in the archive.
    pub name: String,
    /// Base64 (standard alphabet, padded) file contents.
    pub data: String,
    /// Decompressed size in bytes.
    pub size: u64,
}

impl From<ExtractedEntry> for UnzipFile {
    fn from(entry: ExtractedEntry) -> Self {
        Self {
            size: entry.size(),
            data: STANDARD.encode(&entry.data),
            name: entry.name,
        }
    }
}

/// Files extracted from an archive, in archive order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnzipResponse {
    /// Extracted files, excluding directories.
    pub files: Vec<UnzipFile>,
}

impl UnzipResponse {
    /// Builds the response from extracted entries.
    pub fn from_entries(entries: Vec<ExtractedEntry>) -> Self {
        Self {
            files: entries.into_iter().map(UnzipFile::from).collect(),
        }
    }

    /// Returns the total decompressed size of all files.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|file| file.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_entries_in_order() {
        let response = UnzipResponse::from_entries(vec![
            ExtractedEntry::new("b.txt", b"hello".to_vec()),
            ExtractedEntry::new("a.txt", Vec::new()),
        ]);

        assert_eq!(response.files[0].name, "b.txt");
        assert_eq!(response.files[0].data, "aGVsbG8=");
        assert_eq!(response.files[0].size, 5);
        assert_eq!(response.files[1].data, "");
        assert_eq!(response.total_size(), 5);
    }
}

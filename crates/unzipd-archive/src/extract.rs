//! In-memory ZIP extraction.

use std::io::{Cursor, Read, Seek};

use zip::ZipArchive;

use crate::{ExtractError, ExtractResult, ExtractedEntry, IntegrityCheck, Password, TRACING_TARGET};

/// Extracts every file entry of a ZIP archive held in memory.
///
/// Entries are yielded in the archive's enumeration order and directories are
/// skipped. Any failing entry aborts the whole extraction, so callers never see
/// a partial result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveExtractor;

impl ArchiveExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Verifies `bytes` against `check` and then extracts it.
    pub fn extract_verified(
        &self,
        bytes: &[u8],
        check: &IntegrityCheck,
        password: Option<&Password>,
    ) -> ExtractResult<Vec<ExtractedEntry>> {
        check.verify(bytes)?;
        self.extract(bytes, password)
    }

    /// Extracts all file entries, decrypting them with `password` when needed.
    pub fn extract(
        &self,
        bytes: &[u8],
        password: Option<&Password>,
    ) -> ExtractResult<Vec<ExtractedEntry>> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        tracing::debug!(
            target: TRACING_TARGET,
            archive_size = bytes.len(),
            entries = archive.len(),
            encrypted = password.is_some(),
            "opened archive"
        );

        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let Some(name) = archive.name_for_index(index).map(str::to_owned) else {
                return Err(ExtractError::InvalidArchive(format!(
                    "missing entry at index {index}"
                )));
            };

            if is_directory(&name) {
                continue;
            }

            let data = read_entry(&mut archive, index, &name, password)?;
            entries.push(ExtractedEntry::new(name, data));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            files = entries.len(),
            "extracted archive"
        );

        Ok(entries)
    }
}

/// Reads and decompresses a single entry.
fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    name: &str,
    password: Option<&Password>,
) -> ExtractResult<Vec<u8>> {
    let opened = match password {
        Some(password) => archive.by_index_decrypt(index, password.as_bytes()),
        None => archive.by_index(index),
    };
    let mut file = opened.map_err(|error| ExtractError::from_zip(name, error))?;

    if file.enclosed_name().is_none() {
        tracing::warn!(
            target: TRACING_TARGET,
            entry = name,
            "entry name escapes the extraction root"
        );
    }

    let encrypted = file.encrypted();
    let mut data = Vec::new();
    if let Err(source) = file.read_to_end(&mut data) {
        // ZipCrypto lets about one wrong password in 256 through the header
        // check, which then surfaces here as a checksum failure.
        if encrypted {
            return Err(ExtractError::InvalidPassword {
                entry: name.to_owned(),
            });
        }

        return Err(ExtractError::Corrupted {
            entry: name.to_owned(),
            source,
        });
    }

    Ok(data)
}

/// Returns true for directory entries, which end with a path separator.
fn is_directory(name: &str) -> bool {
    name.ends_with('/') || name.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::unstable::write::FileOptionsExt;
    use zip::write::SimpleFileOptions;
    use zip::{AesMode, CompressionMethod, ZipWriter};

    use super::*;

    fn build(files: &[(&str, &[u8])], options: SimpleFileOptions) -> anyhow::Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in files {
            if is_directory(name) {
                writer.add_directory(*name, SimpleFileOptions::default())?;
            } else {
                writer.start_file(*name, options)?;
                writer.write_all(data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }

    fn password(value: &str) -> Option<Password> {
        Password::new(value)
    }

    const FIXTURE: &[(&str, &[u8])] = &[
        ("a.txt", b"alpha"),
        ("b/", b""),
        ("b/c.txt", b"charlie"),
    ];

    #[test]
    fn extracts_stored_entries_and_skips_directories() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let bytes = build(FIXTURE, options)?;

        let entries = ArchiveExtractor::new().extract(&bytes, None)?;
        assert_eq!(
            entries,
            vec![
                ExtractedEntry::new("a.txt", b"alpha".to_vec()),
                ExtractedEntry::new("b/c.txt", b"charlie".to_vec()),
            ]
        );
        Ok(())
    }

    #[test]
    fn extracts_deflated_entries() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let payload = b"repeat ".repeat(512);
        let bytes = build(&[("big.txt", &payload)], options)?;

        let entries = ArchiveExtractor::new().extract(&bytes, None)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].data, payload);
        Ok(())
    }

    #[test]
    fn preserves_archive_order() -> anyhow::Result<()> {
        let files: &[(&str, &[u8])] = &[("z.txt", b"z"), ("a.txt", b"a"), ("m/n.txt", b"n")];
        let bytes = build(files, SimpleFileOptions::default())?;

        let entries = ArchiveExtractor::new().extract(&bytes, None)?;
        let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, ["z.txt", "a.txt", "m/n.txt"]);
        Ok(())
    }

    #[test]
    fn password_is_ignored_for_plain_entries() -> anyhow::Result<()> {
        let bytes = build(FIXTURE, SimpleFileOptions::default())?;

        let entries = ArchiveExtractor::new().extract(&bytes, password("unused").as_ref())?;
        assert_eq!(entries.len(), 2);
        Ok(())
    }

    #[test]
    fn decrypts_aes_entries() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default().with_aes_encryption(AesMode::Aes256, "secret");
        let bytes = build(FIXTURE, options)?;

        let entries = ArchiveExtractor::new().extract(&bytes, password("secret").as_ref())?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].data, b"alpha");
        assert_eq!(entries[1].data, b"charlie");
        Ok(())
    }

    #[test]
    fn decrypts_zipcrypto_entries() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .with_deprecated_encryption(b"secret");
        let bytes = build(FIXTURE, options)?;

        let entries = ArchiveExtractor::new().extract(&bytes, password("secret").as_ref())?;
        assert_eq!(entries[1], ExtractedEntry::new("b/c.txt", b"charlie".to_vec()));
        Ok(())
    }

    #[test]
    fn wrong_aes_password_fails() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default().with_aes_encryption(AesMode::Aes256, "secret");
        let bytes = build(FIXTURE, options)?;

        let error = ArchiveExtractor::new()
            .extract(&bytes, password("wrong").as_ref())
            .unwrap_err();
        assert!(error.is_decryption_failure());
        assert_eq!(error.entry(), Some("a.txt"));
        Ok(())
    }

    #[test]
    fn wrong_zipcrypto_password_fails() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .with_deprecated_encryption(b"secret");
        let bytes = build(FIXTURE, options)?;

        let error = ArchiveExtractor::new()
            .extract(&bytes, password("wrong").as_ref())
            .unwrap_err();
        assert!(error.is_decryption_failure());
        Ok(())
    }

    #[test]
    fn missing_password_fails() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default().with_aes_encryption(AesMode::Aes256, "secret");
        let bytes = build(FIXTURE, options)?;

        let error = ArchiveExtractor::new().extract(&bytes, None).unwrap_err();
        assert!(matches!(error, ExtractError::PasswordRequired { .. }));
        Ok(())
    }

    #[test]
    fn malformed_bytes_fail() {
        let error = ArchiveExtractor::new()
            .extract(b"definitely not a zip archive", None)
            .unwrap_err();
        assert!(matches!(error, ExtractError::InvalidArchive(_)));
        assert!(!error.is_decryption_failure());
    }

    #[test]
    fn extraction_is_repeatable() -> anyhow::Result<()> {
        let options = SimpleFileOptions::default().with_aes_encryption(AesMode::Aes128, "secret");
        let bytes = build(FIXTURE, options)?;
        let extractor = ArchiveExtractor::new();

        let first = extractor.extract(&bytes, password("secret").as_ref())?;
        let second = extractor.extract(&bytes, password("secret").as_ref())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn traversal_names_are_returned_as_stored() -> anyhow::Result<()> {
        let bytes = build(&[("../evil.txt", b"x")], SimpleFileOptions::default())?;

        let entries = ArchiveExtractor::new().extract(&bytes, None)?;
        assert_eq!(entries[0].name, "../evil.txt");
        Ok(())
    }

    #[test]
    fn verified_extraction_rejects_size_mismatch() -> anyhow::Result<()> {
        let bytes = build(FIXTURE, SimpleFileOptions::default())?;
        let check = IntegrityCheck::new(Some(1), None);

        let error = ArchiveExtractor::new()
            .extract_verified(&bytes, &check, None)
            .unwrap_err();
        assert!(error.is_integrity_failure());
        Ok(())
    }
}

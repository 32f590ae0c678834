//! Zip packaging for bulk downloads.

use crate::DownloadSink;
use derive_getters::Getters;
use serde::Serialize;
use sfumato_core::ProcessedImage;
use sfumato_error::{PackagingError, PackagingErrorKind};
use std::io::Write;
use tracing::{debug, error, info, instrument, warn};
use zip::write::{SimpleFileOptions, StreamWriter};
use zip::{CompressionMethod, ZipWriter};

/// Deflate level used unless configured otherwise.
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 9;

/// One (name, bytes) pair to place in an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveEntry<'a> {
    /// Entry name inside the archive
    pub name: &'a str,
    /// Entry contents
    pub data: &'a [u8],
}

impl<'a> ArchiveEntry<'a> {
    /// Create an entry.
    pub fn new(name: &'a str, data: &'a [u8]) -> Self {
        Self { name, data }
    }
}

impl<'a> From<&'a ProcessedImage> for ArchiveEntry<'a> {
    fn from(image: &'a ProcessedImage) -> Self {
        Self::new(&image.optimized_name, &image.data)
    }
}

/// An entry that could not be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct SkippedEntry {
    /// Entry name
    name: String,
    /// Why it was skipped
    reason: String,
}

/// What an archive write actually produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Getters)]
pub struct ArchiveSummary {
    /// Entries written, in order
    written: Vec<String>,
    /// Entries skipped after a per-entry failure
    skipped: Vec<SkippedEntry>,
    /// Whether the central directory was written
    finalized: bool,
    /// Bytes handed to the sink
    bytes_written: u64,
}

/// Streams processed images into a deflate-compressed zip.
///
/// The sink only needs [`Write`]: entries carry data descriptors, so the
/// archive can go straight to a response body, a pipe or stdout. Entry failures are logged and skipped. Whole-archive failures are returned
/// as errors only while the sink is still untouched; after the first byte they
/// are logged and reported through [`ArchiveSummary::finalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchivePackager {
    compression_level: i64,
}

impl Default for ArchivePackager {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl ArchivePackager {
    /// Packager using deflate at `compression_level` (0-9).
    pub fn new(compression_level: i64) -> Self {
        Self { compression_level }
    }

    /// Configured deflate level.
    pub fn compression_level(&self) -> i64 {
        self.compression_level
    }

    fn options(&self) -> Result<SimpleFileOptions, PackagingError> {
        if !(0..=9).contains(&self.compression_level) {
            return Err(PackagingError::new(PackagingErrorKind::Setup(format!(
                "deflate level {} is outside 0-9",
                self.compression_level
            ))));
        }
        Ok(SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level)))
    }

    /// Stream `entries` in order into `sink` as a zip archive.
    ///
    /// Nothing is buffered beyond the entry being compressed; bytes reach the
    /// sink as soon as the encoder emits them.
    ///
    /// # Errors
    ///
    /// Returns a [`PackagingError`] when setup or finalization fails before any
    /// byte reached the sink.
    #[instrument(skip_all, fields(level = self.compression_level))]
    pub fn write_archive<'a, W, I>(
        &self,
        entries: I,
        sink: &mut DownloadSink<W>,
    ) -> Result<ArchiveSummary, PackagingError>
    where
        W: Write,
        I: IntoIterator<Item = ArchiveEntry<'a>>,
    {
        let progress = sink.progress();
        let options = self.options().map_err(|e| {
            error!(error = %e, "Archive setup failed");
            e
        })?;

        let mut summary = ArchiveSummary::default();
        let mut zip = ZipWriter::new_stream(&mut *sink);

        for entry in entries {
            match append(&mut zip, entry, options) {
                Ok(()) => {
                    debug!(name = entry.name, size = entry.data.len(), "Added archive entry");
                    summary.written.push(entry.name.to_string());
                }
                Err(reason) => {
                    warn!(name = entry.name, reason = %reason, "Skipping archive entry");
                    summary.skipped.push(SkippedEntry {
                        name: entry.name.to_string(),
                        reason,
                    });
                }
            }
        }

        let finished = zip
            .finish()
            .and_then(|mut writer| writer.flush().map_err(Into::into));
        summary.bytes_written = progress.bytes_written();

        match finished {
            Ok(()) => {
                summary.finalized = true;
                info!(
                    written = summary.written.len(),
                    skipped = summary.skipped.len(),
                    bytes = summary.bytes_written,
                    "Archive complete"
                );
                Ok(summary)
            }
            Err(e) if !progress.has_begun() => {
                error!(error = %e, "Archive failed before any byte was sent");
                Err(PackagingError::new(PackagingErrorKind::Finalize(
                    e.to_string(),
                )))
            }
            Err(e) => {
                error!(
                    error = %e,
                    bytes = summary.bytes_written,
                    "Archive failed after response began, download is truncated"
                );
                Ok(summary)
            }
        }
    }

    /// Build a complete archive in memory.
    ///
    /// # Errors
    ///
    /// Fails on setup errors or when the archive could not be finalized.
    pub fn build_archive<'a, I>(
        &self,
        entries: I,
    ) -> Result<(Vec<u8>, ArchiveSummary), PackagingError>
    where
        I: IntoIterator<Item = ArchiveEntry<'a>>,
    {
        let mut sink = DownloadSink::new(Vec::new());
        let summary = self.write_archive(entries, &mut sink)?;
        if !summary.finalized {
            return Err(PackagingError::new(PackagingErrorKind::Finalize(
                "archive was not finalized".to_string(),
            )));
        }
        Ok((sink.into_inner(), summary))
    }
}

fn append<W: Write>(
    zip: &mut ZipWriter<StreamWriter<W>>,
    entry: ArchiveEntry<'_>,
    options: SimpleFileOptions,
) -> Result<(), String> {
    zip.start_file(entry.name, options)
        .map_err(|e| e.to_string())?;
    if let Err(e) = zip.write_all(entry.data) {
        if let Err(abort) = zip.abort_file() {
            warn!(name = entry.name, error = %abort, "Failed to discard partial entry");
        }
        return Err(e.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_out_of_range_is_setup_error() {
        let err = ArchivePackager::new(12).options().unwrap_err();
        assert!(matches!(err.kind, PackagingErrorKind::Setup(_)));
    }

    #[test]
    fn entry_from_processed_image_uses_optimized_name() {
        let image = ProcessedImage {
            original_name: "IMG_1.JPG".to_string(),
            optimized_name: "red-shoe.jpg".to_string(),
            data: vec![1, 2, 3],
            description: "red shoe".to_string(),
            keyword: "shoe".to_string(),
            original_size: 6,
            optimized_size: 3,
            compression_ratio: sfumato_core::CompressionRatio::between(6, 3),
        };
        let entry = ArchiveEntry::from(&image);
        assert_eq!(entry.name, "red-shoe.jpg");
        assert_eq!(entry.data, &[1, 2, 3]);
    }
}

//! Single-file and zip downloads for the Sfumato image asset pipeline.
//!
//! Two ways out for processed images:
//!
//! - [`SingleDownload`] - bytes plus content type and content disposition
//! - [`ArchivePackager`] - every image in one deflate-compressed zip, written
//!   to a [`DownloadSink`] that knows whether the response has begun
//!
//! # Example
//!
//! ```
//! use sfumato_archive::{ArchiveEntry, ArchivePackager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let entries = vec![
//!     ArchiveEntry::new("red-shoe.jpg", b"jpeg bytes"),
//!     ArchiveEntry::new("blue-shoe.png", b"png bytes"),
//! ];
//! let (bytes, summary) = ArchivePackager::default().build_archive(entries)?;
//! assert_eq!(summary.written(), &["red-shoe.jpg", "blue-shoe.png"]);
//! assert!(!bytes.is_empty());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod packager;
mod single;
mod sink;

pub use packager::{
    ArchiveEntry, ArchivePackager, ArchiveSummary, DEFAULT_COMPRESSION_LEVEL, SkippedEntry,
};
pub use single::{SingleDownload, ascii_fallback, content_disposition, content_type_for};
pub use sink::{DownloadSink, SinkProgress};

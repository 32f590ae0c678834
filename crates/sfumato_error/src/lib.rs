//! Error types for the Sfumato image asset pipeline.
//!
//! This crate provides the error taxonomy shared by every Sfumato crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Item-level errors ([`CompressionError`], [`FormatError`]) are folded into a
//! [`ProcessingError`] that carries the original name of the failing image.
//! The batch orchestrator records those as data and never raises them.
//!
//! # Examples
//!
//! ```
//! use sfumato_error::{CompressionError, CompressionErrorKind, SfumatoResult};
//!
//! fn encode() -> SfumatoResult<Vec<u8>> {
//!     Err(CompressionError::new(CompressionErrorKind::Encode("bad scanline".into())))?
//! }
//!
//! assert!(encode().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod compression;
mod config;
mod error;
mod format;
mod packaging;
mod processing;
mod upload;
mod vision;

pub use compression::{CompressionError, CompressionErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{SfumatoError, SfumatoErrorKind, SfumatoResult};
pub use format::FormatError;
pub use packaging::{PackagingError, PackagingErrorKind};
pub use processing::{ProcessingError, ProcessingErrorKind};
pub use upload::{UploadError, UploadErrorKind};
pub use vision::{RetryableError, VisionError, VisionErrorKind};

//! Core data types for the Sfumato image asset pipeline.
//!
//! This crate provides the value types that flow through every stage:
//! source images in, processed images and failures out, aggregated into a
//! [`BatchResult`]. All types are owned values with no shared state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod format;
mod keywords;
mod processed;
mod source;

pub use batch::BatchResult;
pub use format::{
    EncodingProfile, ImageFormat, JPEG_QUALITY, JpegProfile, PNG_COMPRESSION_LEVEL, PngProfile,
};
pub use keywords::{DEFAULT_KEYWORD, Keywords, ResolvedKeywords};
pub use processed::{CompressionRatio, ProcessedImage, ProcessingFailure};
pub use source::SourceImage;

//! Upload intake errors.

/// Reasons an upload is refused before it enters the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum UploadErrorKind {
    /// File exceeds the per-item size cap
    #[display("'{}' is {} bytes, above the {} byte limit", name, size, limit)]
    TooLarge {
        /// File name
        name: String,
        /// Actual size in bytes
        size: u64,
        /// Configured cap in bytes
        limit: usize,
    },
    /// File could not be read
    #[display("Failed to read '{}': {}", name, message)]
    Read {
        /// File name
        name: String,
        /// Underlying I/O message
        message: String,
    },
    /// Nothing was submitted
    #[display("No images were provided")]
    Empty,
}

/// Upload error with location tracking.
///
/// # Examples
///
/// ```
/// use sfumato_error::{UploadError, UploadErrorKind};
///
/// let err = UploadError::new(UploadErrorKind::TooLarge {
///     name: "poster.png".to_string(),
///     size: 20,
///     limit: 10,
/// });
/// assert!(format!("{}", err).contains("poster.png"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Upload Error: {} at line {} in {}", kind, line, file)]
pub struct UploadError {
    /// The kind of error that occurred
    pub kind: UploadErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UploadError {
    /// Create a new upload error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UploadErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

//! Codec failures raised while re-encoding a single image.

/// Specific codec failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CompressionErrorKind {
    /// Source bytes could not be decoded into pixels
    #[display("Failed to decode image: {}", _0)]
    Decode(String),
    /// The JPEG encoder rejected the pixel data
    #[display("Failed to encode image: {}", _0)]
    Encode(String),
    /// The PNG optimizer failed
    #[display("Failed to optimize PNG: {}", _0)]
    Optimize(String),
    /// The native encoder aborted by unwinding
    #[display("Encoder aborted: {}", _0)]
    Panicked(String),
}

/// Codec error with source location tracking.
///
/// Terminal for the affected item only; never retried.
///
/// # Examples
///
/// ```
/// use sfumato_error::{CompressionError, CompressionErrorKind};
///
/// let err = CompressionError::new(CompressionErrorKind::Decode("truncated".to_string()));
/// assert!(format!("{}", err).contains("truncated"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Compression Error: {} at line {} in {}", kind, line, file)]
pub struct CompressionError {
    /// The kind of error that occurred
    pub kind: CompressionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CompressionError {
    /// Create a new compression error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CompressionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CompressionErrorKind {
        &self.kind
    }
}

//! Per-item processing errors.

use crate::{CompressionError, FormatError};

/// Stage that failed while processing one image.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum ProcessingErrorKind {
    /// Declared media type is not a supported format
    #[display("{}", _0)]
    #[from(FormatError)]
    Format(FormatError),
    /// Codec failed to re-encode the image
    #[display("{}", _0)]
    #[from(CompressionError)]
    Compression(CompressionError),
    /// Blocking encoder task was cancelled or panicked
    #[display("Encoder task failed: {}", _0)]
    Task(String),
}

/// Processing error tagged with the original name of the failing image.
///
/// # Examples
///
/// ```
/// use sfumato_error::{FormatError, ProcessingError};
///
/// let err = ProcessingError::new("banner.gif", FormatError::new("image/gif"));
/// assert_eq!(err.original_name, "banner.gif");
/// assert!(err.message().contains("image/gif"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Processing Error for '{}': {} at line {} in {}", original_name, kind, line, file)]
pub struct ProcessingError {
    /// Display name of the image that failed
    pub original_name: String,
    /// The stage failure
    pub kind: ProcessingErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProcessingError {
    /// Wrap a stage failure with the image name at the current location.
    #[track_caller]
    pub fn new(original_name: impl Into<String>, kind: impl Into<ProcessingErrorKind>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            original_name: original_name.into(),
            kind: kind.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ProcessingErrorKind {
        &self.kind
    }

    /// Human-readable message for the failure, without location noise.
    pub fn message(&self) -> String {
        match &self.kind {
            ProcessingErrorKind::Format(err) => {
                format!("Unsupported image format: {}", err.media_type)
            }
            ProcessingErrorKind::Compression(err) => err.kind.to_string(),
            ProcessingErrorKind::Task(msg) => format!("Encoder task failed: {}", msg),
        }
    }
}

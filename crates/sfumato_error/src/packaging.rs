//! Archive packaging errors.

/// Kinds of packaging errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PackagingErrorKind {
    /// Archive writer could not be set up
    #[display("Failed to start archive: {}", _0)]
    Setup(String),
    /// Central directory could not be written
    #[display("Failed to finalize archive: {}", _0)]
    Finalize(String),
    /// Underlying sink rejected a write
    #[display("Archive I/O failed: {}", _0)]
    Io(String),
}

/// Packaging error with location tracking.
///
/// Only raised for whole-operation failures that happen before any response
/// byte has been written. Per-entry failures are logged and skipped instead.
///
/// # Examples
///
/// ```
/// use sfumato_error::{PackagingError, PackagingErrorKind};
///
/// let err = PackagingError::new(PackagingErrorKind::Setup("sink closed".to_string()));
/// assert!(format!("{}", err).contains("sink closed"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Packaging Error: {} at line {} in {}", kind, line, file)]
pub struct PackagingError {
    /// The kind of error that occurred
    pub kind: PackagingErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PackagingError {
    /// Create a new packaging error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PackagingErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

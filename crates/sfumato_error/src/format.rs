//! Unsupported media type errors.

/// Raised when a declared media type does not map to a supported image format.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Unsupported image format '{}' at line {} in {}", media_type, line, file)]
pub struct FormatError {
    /// The declared media type as received
    pub media_type: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl FormatError {
    /// Create a new FormatError for the given media type at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use sfumato_error::FormatError;
    ///
    /// let err = FormatError::new("image/gif");
    /// assert_eq!(err.media_type, "image/gif");
    /// ```
    #[track_caller]
    pub fn new(media_type: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            media_type: media_type.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

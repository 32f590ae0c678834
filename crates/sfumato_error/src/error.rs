//! Top-level error wrapper types.

use crate::{
    CompressionError, ConfigError, FormatError, PackagingError, ProcessingError, UploadError,
    VisionError,
};

/// Every error condition a Sfumato crate can surface.
///
/// # Examples
///
/// ```
/// use sfumato_error::{ConfigError, ConfigErrorKind, SfumatoError};
///
/// let err: SfumatoError = ConfigError::new(ConfigErrorKind::Build("bad value".into())).into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SfumatoErrorKind {
    /// Codec error
    #[from(CompressionError)]
    Compression(CompressionError),
    /// Unsupported media type
    #[from(FormatError)]
    Format(FormatError),
    /// Vision back-end error
    #[from(VisionError)]
    Vision(VisionError),
    /// Per-item processing error
    #[from(ProcessingError)]
    Processing(ProcessingError),
    /// Archive packaging error
    #[from(PackagingError)]
    Packaging(PackagingError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Rejected upload
    #[from(UploadError)]
    Upload(UploadError),
}

/// Sfumato error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Sfumato Error: {}", _0)]
pub struct SfumatoError(Box<SfumatoErrorKind>);

impl SfumatoError {
    /// Create a new error from a kind.
    pub fn new(kind: SfumatoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SfumatoErrorKind {
        &self.0
    }
}

impl<T> From<T> for SfumatoError
where
    T: Into<SfumatoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Sfumato operations.
pub type SfumatoResult<T> = std::result::Result<T, SfumatoError>;

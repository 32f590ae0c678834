//! Layered configuration errors.

/// Where loading the layered configuration failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A source could not be read or merged (missing explicit file, bad TOML)
    #[display("Failed to build configuration: {}", _0)]
    Build(String),
    /// The merged values do not fit the settings schema
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use sfumato_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Parse("unknown variant `clippy`".into()));
/// assert!(format!("{}", err).contains("Failed to parse configuration"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// Which stage failed
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

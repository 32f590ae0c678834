//! Vision back-end errors and retry classification.

/// Vision back-end error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum VisionErrorKind {
    /// API key unset or blank in the environment
    #[display("{} environment variable not set or empty", _0)]
    MissingApiKey(String),
    /// Failed to build the HTTP client
    #[display("Failed to create vision client: {}", _0)]
    ClientCreation(String),
    /// Transport-level failure (DNS, connection reset, TLS)
    #[display("Vision API request failed: {}", _0)]
    Request(String),
    /// Request exceeded the configured timeout
    #[display("Vision API request timed out after {}s", _0)]
    Timeout(u64),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Response body did not match the expected shape
    #[display("Failed to parse vision response: {}", _0)]
    Parse(String),
    /// Response parsed but carried no text
    #[display("Vision API returned no text")]
    EmptyResponse,
    /// Request DTO could not be built
    #[display("Failed to build vision request: {}", _0)]
    Builder(String),
}

impl VisionErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            VisionErrorKind::Http { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            VisionErrorKind::Request(_) => true,
            VisionErrorKind::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            VisionErrorKind::Http { status_code, .. } => match *status_code {
                429 => (2000, 2, 10),
                503 => (1000, 3, 10),
                500 | 502 | 504 => (500, 2, 4),
                408 => (1000, 2, 8),
                _ => (1000, 2, 8),
            },
            VisionErrorKind::Timeout(_) => (1000, 1, 4),
            _ => (500, 2, 4),
        }
    }
}

/// Vision error with source location tracking.
///
/// Vision errors never escape the describer: they are logged and replaced by a
/// fallback description.
///
/// # Examples
///
/// ```
/// use sfumato_error::{VisionError, VisionErrorKind};
///
/// let err = VisionError::new(VisionErrorKind::MissingApiKey("OPENAI_API_KEY".into()));
/// assert!(format!("{}", err).contains("OPENAI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Vision Error: {} at line {} in {}", kind, line, file)]
pub struct VisionError {
    /// The kind of error that occurred
    pub kind: VisionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VisionError {
    /// Create a new VisionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VisionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use sfumato_error::{RetryableError, VisionError, VisionErrorKind};
///
/// let err = VisionError::new(VisionErrorKind::Http {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 1000);
/// assert_eq!(retries, 3);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503, 429 or network timeouts return true.
    /// Permanent errors like 401 or 400 return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (500, 2, 4)
    }
}

impl RetryableError for VisionError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}

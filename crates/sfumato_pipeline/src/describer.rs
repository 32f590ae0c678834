//! Short content descriptions with graceful degradation.
//!
//! The describer never fails. Without a configured back-end it answers
//! [`FALLBACK_UNCONFIGURED`] immediately; when the back-end errors it answers
//! [`FALLBACK_FAILED`]. The two strings are kept distinct so logs and tests can
//! tell "not configured" apart from "configured but failing".

use crate::config::{DescriberConfig, VisionProvider};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use sfumato_core::ImageFormat;
use sfumato_error::{VisionError, VisionErrorKind};
use sfumato_interface::{ImageDetail, VisionDriver, VisionRequest};
use sfumato_models::{GeminiVisionClient, OpenAiVisionClient, RetrySettings};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Description used when no vision back-end is configured.
pub const FALLBACK_UNCONFIGURED: &str = "product image";

/// Description used when the vision back-end fails.
pub const FALLBACK_FAILED: &str = "product image description";

/// Instruction sent with every image.
pub const DESCRIPTION_PROMPT: &str = "Describe this image in 10 to 15 words for use in an SEO \
filename. Focus on the main subject, its colors and its most distinctive visual features. \
Reply with the description only, without punctuation or quotes.";

const DEFAULT_MAX_TOKENS: u32 = 60;
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Outcome of one describe call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Description {
    /// Trimmed model output
    Generated(String),
    /// No back-end configured
    Unconfigured,
    /// Back-end configured but the call failed
    Failed,
}

impl Description {
    /// Text to use for naming.
    pub fn text(&self) -> &str {
        match self {
            Description::Generated(text) => text,
            Description::Unconfigured => FALLBACK_UNCONFIGURED,
            Description::Failed => FALLBACK_FAILED,
        }
    }

    /// Owned text to use for naming.
    pub fn into_text(self) -> String {
        match self {
            Description::Generated(text) => text,
            other => other.text().to_string(),
        }
    }

    /// Whether a fallback replaced model output.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Description::Generated(_))
    }
}

/// Bounded, rate-limited front for an optional [`VisionDriver`].
///
/// # Example
///
/// ```
/// use sfumato_core::ImageFormat;
/// use sfumato_pipeline::{Describer, FALLBACK_UNCONFIGURED};
///
/// # #[tokio::main]
/// # async fn main() {
/// let describer = Describer::unconfigured();
/// let text = describer.describe(b"any bytes", ImageFormat::Png).await;
/// assert_eq!(text, FALLBACK_UNCONFIGURED);
/// # }
/// ```
#[derive(Clone)]
pub struct Describer {
    driver: Option<Arc<dyn VisionDriver>>,
    detail: ImageDetail,
    max_tokens: u32,
    semaphore: Arc<Semaphore>,
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
}

impl std::fmt::Debug for Describer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Describer")
            .field(
                "driver",
                &self
                    .driver
                    .as_ref()
                    .map(|d| format!("{}/{}", d.provider_name(), d.model_name())),
            )
            .field("detail", &self.detail)
            .field("max_tokens", &self.max_tokens)
            .field("rate_limited", &self.rpm_limiter.is_some())
            .finish()
    }
}

impl Describer {
    /// A describer with no back-end; every call returns [`FALLBACK_UNCONFIGURED`].
    pub fn unconfigured() -> Self {
        Self {
            driver: None,
            detail: ImageDetail::Low,
            max_tokens: DEFAULT_MAX_TOKENS,
            semaphore: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT)),
            rpm_limiter: None,
        }
    }

    /// A describer calling `driver`.
    pub fn new(driver: Arc<dyn VisionDriver>) -> Self {
        Self {
            driver: Some(driver),
            ..Self::unconfigured()
        }
    }

    /// Build from configuration, reading the provider credential from the environment.
    ///
    /// A missing credential or an unusable client yields an unconfigured describer.
    #[instrument(skip(config), fields(provider = %config.provider))]
    pub fn from_config(config: &DescriberConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let retry = RetrySettings {
            no_retry: false,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        };

        let driver: Result<Arc<dyn VisionDriver>, VisionError> = match config.provider {
            VisionProvider::OpenAi => OpenAiVisionClient::from_env(config.model_name())
                .and_then(|client| client.with_timeout(timeout))
                .map(|client| match &config.base_url {
                    Some(url) => client.with_base_url(url),
                    None => client,
                })
                .map(|client| Arc::new(client.with_retry(retry)) as Arc<dyn VisionDriver>),
            VisionProvider::Gemini => GeminiVisionClient::from_env(config.model_name())
                .and_then(|client| client.with_timeout(timeout))
                .map(|client| match &config.base_url {
                    Some(url) => client.with_base_url(url),
                    None => client,
                })
                .map(|client| Arc::new(client.with_retry(retry)) as Arc<dyn VisionDriver>),
        };

        let describer = match driver {
            Ok(driver) => {
                info!(model = config.model_name(), "Vision describer configured");
                Self::new(driver)
            }
            Err(e) if matches!(e.kind, VisionErrorKind::MissingApiKey(_)) => {
                info!(reason = %e.kind, "Vision describer not configured, using fallback descriptions");
                Self::unconfigured()
            }
            Err(e) => {
                warn!(error = %e, "Vision client unavailable, using fallback descriptions");
                Self::unconfigured()
            }
        };

        describer
            .with_detail(config.detail)
            .with_max_tokens(config.max_tokens)
            .with_max_concurrent(config.max_concurrent)
            .with_requests_per_minute(config.requests_per_minute)
    }

    /// Set the resolution hint.
    pub fn with_detail(mut self, detail: ImageDetail) -> Self {
        self.detail = detail;
        self
    }

    /// Set the output token bound.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Bound calls in flight; zero is treated as one.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
        self
    }

    /// Cap requests per minute; `None` or zero removes the cap.
    pub fn with_requests_per_minute(mut self, rpm: Option<u32>) -> Self {
        self.rpm_limiter = rpm
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));
        self
    }

    /// Whether a back-end is attached.
    pub fn is_configured(&self) -> bool {
        self.driver.is_some()
    }

    /// Describe `buffer` and return the text to use for naming.
    pub async fn describe(&self, buffer: &[u8], format: ImageFormat) -> String {
        self.classify(buffer, format).await.into_text()
    }

    /// Describe `buffer`, reporting which path produced the text.
    #[instrument(skip(self, buffer), fields(input_len = buffer.len(), format = %format))]
    pub async fn classify(&self, buffer: &[u8], format: ImageFormat) -> Description {
        let Some(driver) = &self.driver else {
            debug!("No vision back-end, using unconfigured fallback");
            return Description::Unconfigured;
        };

        match self.call(driver.as_ref(), buffer, format).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!(provider = driver.provider_name(), "Vision back-end returned blank text");
                    Description::Failed
                } else {
                    debug!(description = %text, "Generated description");
                    Description::Generated(text.to_string())
                }
            }
            Err(e) => {
                warn!(provider = driver.provider_name(), error = %e, "Vision call failed, using failure fallback");
                Description::Failed
            }
        }
    }

    async fn call(
        &self,
        driver: &dyn VisionDriver,
        buffer: &[u8],
        format: ImageFormat,
    ) -> Result<String, VisionError> {
        let request = VisionRequest::builder()
            .image(buffer.to_vec())
            .mime_type(format.mime_type())
            .prompt(DESCRIPTION_PROMPT)
            .detail(self.detail)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| VisionError::new(VisionErrorKind::Builder(e.to_string())))?;

        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| VisionError::new(VisionErrorKind::Request(e.to_string())))?;

        driver.describe_image(&request).await
    }
}

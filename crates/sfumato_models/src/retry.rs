//! Retry policy shared by the HTTP back-ends.

use sfumato_error::{RetryableError, VisionError};
use std::future::Future;
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{info, warn};

/// Overrides for the error-specific retry strategy.
///
/// `None` keeps the value chosen by [`RetryableError::retry_strategy_params`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrySettings {
    /// Disable retries entirely
    pub no_retry: bool,
    /// Maximum retry attempts after the first failure
    pub max_retries: Option<usize>,
    /// Initial backoff in milliseconds
    pub retry_backoff_ms: Option<u64>,
}

/// Run `operation`, retrying transient failures.
///
/// The first failure picks the backoff strategy; permanent errors return at once.
pub(crate) async fn with_retry<T, F, Fut>(
    settings: RetrySettings,
    mut operation: F,
) -> Result<T, VisionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, VisionError>>,
{
    let first_error = match operation().await {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if settings.no_retry || !first_error.is_retryable() {
        warn!(error = %first_error, "Permanent vision API error, failing immediately");
        return Err(first_error);
    }

    let (mut initial_ms, mut max_retries, max_delay_secs) = first_error.retry_strategy_params();
    if let Some(override_backoff) = settings.retry_backoff_ms {
        initial_ms = override_backoff;
    }
    if let Some(override_retries) = settings.max_retries {
        max_retries = override_retries;
    }
    if max_retries == 0 {
        return Err(first_error);
    }

    info!(
        error = %first_error,
        initial_backoff_ms = initial_ms,
        max_retries,
        max_delay_secs,
        "Vision API request failed, will retry with configured strategy"
    );

    let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(max_retries);

    Retry::spawn(retry_strategy, || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Vision API request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent vision API error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}

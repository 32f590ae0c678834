//! Transport helpers shared by the REST back-ends.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use sfumato_error::{VisionError, VisionErrorKind};
use std::time::Duration;
use tracing::error;

/// Build an HTTP client with a whole-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, VisionError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        error!(error = ?e, "Failed to build HTTP client");
        VisionError::new(VisionErrorKind::ClientCreation(e.to_string()))
    })
}

/// Read a provider credential from `var`.
pub(crate) fn api_key_from_env(var: &str) -> Result<String, VisionError> {
    non_blank_key(var, std::env::var(var).ok())
}

/// An unset, empty or whitespace-only key counts as missing.
fn non_blank_key(var: &str, value: Option<String>) -> Result<String, VisionError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(VisionError::new(VisionErrorKind::MissingApiKey(var.to_string()))),
    }
}

/// Classify a transport failure.
pub(crate) fn request_error(e: reqwest::Error, timeout: Duration) -> VisionError {
    if e.is_timeout() {
        error!(timeout_secs = timeout.as_secs(), "Vision API request timed out");
        VisionError::new(VisionErrorKind::Timeout(timeout.as_secs()))
    } else {
        error!(error = ?e, "Failed to send request to vision API");
        VisionError::new(VisionErrorKind::Request(e.to_string()))
    }
}

/// Check the status and decode the body of a provider response.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    provider: &'static str,
) -> Result<T, VisionError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(provider, status = %status, body = %body, "Vision API returned error");
        return Err(VisionError::new(VisionErrorKind::Http {
            status_code: status.as_u16(),
            message: body,
        }));
    }

    response.json::<T>().await.map_err(|e| {
        error!(provider, error = ?e, "Failed to parse vision response");
        VisionError::new(VisionErrorKind::Parse(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_count_as_missing() {
        for value in [None, Some(String::new()), Some("  \t".to_string())] {
            let err = non_blank_key("OPENAI_API_KEY", value).unwrap_err();
            assert_eq!(
                err.kind,
                VisionErrorKind::MissingApiKey("OPENAI_API_KEY".to_string())
            );
        }
    }

    #[test]
    fn keys_are_trimmed() {
        let key = non_blank_key("GEMINI_API_KEY", Some(" abc123\n".to_string())).unwrap();
        assert_eq!(key, "abc123");
    }
}

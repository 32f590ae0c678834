//! Trait definitions for encoder and vision back-ends.

use crate::VisionRequest;
use async_trait::async_trait;
use sfumato_core::EncodingProfile;
use sfumato_error::{CompressionError, VisionError};

/// Re-encodes an image buffer under a format-specific profile.
///
/// Encoding is CPU-bound and synchronous. Async callers are expected to move
/// the call onto the blocking thread pool.
pub trait Codec: Send + Sync {
    /// Encode `buffer` according to `profile`.
    ///
    /// Implementations must not touch the filesystem or network and must not
    /// retry on failure.
    fn encode(&self, buffer: &[u8], profile: &EncodingProfile) -> Result<Vec<u8>, CompressionError>;

    /// Short identifier used in logs (e.g. "native").
    fn name(&self) -> &'static str;
}

/// A multimodal model that can describe an image in text.
#[async_trait]
pub trait VisionDriver: Send + Sync {
    /// Describe the inline image in `request`.
    ///
    /// Returns the raw model text. Callers trim and apply fallbacks.
    async fn describe_image(&self, request: &VisionRequest) -> Result<String, VisionError>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

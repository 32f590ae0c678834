//! Request types shared by vision back-ends.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Resolution hint passed to the vision model.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageDetail {
    /// Downsampled, cheapest option
    #[default]
    Low,
    /// Full resolution tiles
    High,
    /// Let the provider decide
    Auto,
}

/// A single describe-this-image request.
///
/// The image always travels inline; back-ends never receive a URL.
///
/// # Examples
///
/// ```
/// use sfumato_interface::{ImageDetail, VisionRequest};
///
/// let request = VisionRequest::builder()
///     .image(vec![0x89, b'P', b'N', b'G'])
///     .mime_type("image/png")
///     .prompt("Describe this image.")
///     .max_tokens(60u32)
///     .build()
///     .unwrap();
/// assert_eq!(*request.detail(), ImageDetail::Low);
/// ```
#[derive(Clone, PartialEq, Eq, Builder, Getters)]
#[builder(setter(into))]
pub struct VisionRequest {
    /// Encoded image bytes
    image: Vec<u8>,
    /// MIME type of `image`
    mime_type: String,
    /// Instruction text sent alongside the image
    prompt: String,
    /// Resolution hint
    #[builder(default)]
    detail: ImageDetail,
    /// Upper bound on generated tokens
    max_tokens: u32,
}

impl VisionRequest {
    /// Creates a new builder for `VisionRequest`.
    pub fn builder() -> VisionRequestBuilder {
        VisionRequestBuilder::default()
    }
}

impl std::fmt::Debug for VisionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionRequest")
            .field("image_len", &self.image.len())
            .field("mime_type", &self.mime_type)
            .field("detail", &self.detail)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn detail_parses_lowercase() {
        assert_eq!(ImageDetail::from_str("low").unwrap(), ImageDetail::Low);
        assert_eq!(ImageDetail::from_str("auto").unwrap(), ImageDetail::Auto);
        assert_eq!(ImageDetail::High.to_string(), "high");
    }

    #[test]
    fn builder_requires_image() {
        let result = VisionRequest::builder()
            .mime_type("image/jpeg")
            .prompt("p")
            .max_tokens(10u32)
            .build();
        assert!(result.is_err());
    }
}

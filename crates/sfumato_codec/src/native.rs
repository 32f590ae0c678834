//! Format dispatch for the native encoders.

use crate::{jpeg, png};
use derive_builder::Builder;
use sfumato_core::EncodingProfile;
use sfumato_error::CompressionError;
use sfumato_interface::Codec;
use std::time::Duration;
use tracing::{debug, instrument};

/// In-process encoder backed by mozjpeg and oxipng.
///
/// Stateless apart from its limits; cheap to clone and share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct NativeCodec {
    /// Upper bound on PNG optimization wall time
    #[builder(default = "Some(Duration::from_secs(30))")]
    png_timeout: Option<Duration>,
    /// Reject PNGs that inflate beyond this many bytes
    #[builder(default = "Some(256 * 1024 * 1024)")]
    max_decompressed_size: Option<usize>,
}

impl NativeCodec {
    /// Creates a new builder for `NativeCodec`.
    pub fn builder() -> NativeCodecBuilder {
        NativeCodecBuilder::default()
    }
}

impl Default for NativeCodec {
    fn default() -> Self {
        Self {
            png_timeout: Some(Duration::from_secs(30)),
            max_decompressed_size: Some(256 * 1024 * 1024),
        }
    }
}

impl Codec for NativeCodec {
    #[instrument(skip(self, buffer), fields(input_len = buffer.len(), format = %profile.format()))]
    fn encode(&self, buffer: &[u8], profile: &EncodingProfile) -> Result<Vec<u8>, CompressionError> {
        let encoded = match profile {
            EncodingProfile::Jpeg(jpeg_profile) => jpeg::encode(buffer, jpeg_profile)?,
            EncodingProfile::Png(png_profile) => png::optimize(
                buffer,
                png_profile,
                self.png_timeout,
                self.max_decompressed_size,
            )?,
        };
        debug!(output_len = encoded.len(), "Encoded image");
        Ok(encoded)
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

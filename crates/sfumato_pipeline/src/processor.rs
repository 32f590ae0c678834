//! Single-image processing: format, encode, describe, name.

use crate::Describer;
use crate::filename::synthesize;
use sfumato_core::{CompressionRatio, ImageFormat, ProcessedImage, SourceImage};
use sfumato_error::{ProcessingError, ProcessingErrorKind};
use sfumato_interface::Codec;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Runs one [`SourceImage`] through every stage.
///
/// Stages run in order: format parsing, encoding on the blocking pool,
/// description of the original buffer, filename synthesis, ratio.
#[derive(Clone)]
pub struct ItemProcessor {
    codec: Arc<dyn Codec>,
    describer: Describer,
}

impl std::fmt::Debug for ItemProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemProcessor")
            .field("codec", &self.codec.name())
            .field("describer", &self.describer)
            .finish()
    }
}

impl ItemProcessor {
    /// Create a processor from its two capabilities.
    pub fn new(codec: Arc<dyn Codec>, describer: Describer) -> Self {
        Self { codec, describer }
    }

    /// The describer used for naming.
    pub fn describer(&self) -> &Describer {
        &self.describer
    }

    /// Process one image under `keyword`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingError`] carrying the image name when the media type
    /// is unsupported, the codec fails, or the encoder task dies. Description
    /// problems never surface here.
    #[instrument(skip(self, image), fields(name = %image.original_name(), size = image.size()))]
    pub async fn process(
        &self,
        image: SourceImage,
        keyword: &str,
    ) -> Result<ProcessedImage, ProcessingError> {
        let format = ImageFormat::from_media_type(image.media_type())
            .map_err(|e| ProcessingError::new(image.original_name(), e))?;
        let original_size = *image.size();
        let (bytes, _media_type, original_name) = image.into_parts();
        let original = Arc::new(bytes);

        let encoded = self
            .encode(Arc::clone(&original), format)
            .await
            .map_err(|kind| {
                error!(error = %kind, "Encoding failed");
                ProcessingError::new(&original_name, kind)
            })?;

        let description = self.describer.describe(&original, format).await;
        let optimized_name = synthesize(keyword, &description, format.extension());
        let optimized_size = encoded.len();
        let compression_ratio = CompressionRatio::between(original_size, optimized_size);

        debug!(
            optimized_name = %optimized_name,
            original_size,
            optimized_size,
            ratio = %compression_ratio,
            "Processed image"
        );

        Ok(ProcessedImage {
            original_name,
            optimized_name,
            data: encoded,
            description,
            keyword: keyword.to_string(),
            original_size,
            optimized_size,
            compression_ratio,
        })
    }

    async fn encode(
        &self,
        buffer: Arc<Vec<u8>>,
        format: ImageFormat,
    ) -> Result<Vec<u8>, ProcessingErrorKind> {
        let codec = Arc::clone(&self.codec);
        let profile = format.profile();
        tokio::task::spawn_blocking(move || codec.encode(&buffer, &profile))
            .await
            .map_err(|e| ProcessingErrorKind::Task(e.to_string()))?
            .map_err(ProcessingErrorKind::from)
    }
}

//! Lossless PNG recompression through oxipng.

use image::ImageFormat as RasterFormat;
use oxipng::{FilterStrategy, Options, RowFilter, StripChunks, optimize_from_memory};
use sfumato_core::PngProfile;
use sfumato_error::{CompressionError, CompressionErrorKind};
use std::borrow::Cow;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, error};

/// Optimizer settings for `profile`.
pub(crate) fn options(
    profile: &PngProfile,
    timeout: Option<Duration>,
    max_decompressed_size: Option<usize>,
) -> Options {
    let mut options = Options::from_preset(profile.compression_level);
    options.strip = StripChunks::Safe;
    options.timeout = timeout;
    options.max_decompressed_size = max_decompressed_size;
    if !profile.adaptive_filtering {
        options.filters.clear();
        options.filters.insert(FilterStrategy::Basic(RowFilter::None));
    }
    options
}

/// Re-encode a non-PNG raster as PNG; PNG input passes through untouched.
fn as_png(buffer: &[u8]) -> Result<Cow<'_, [u8]>, CompressionError> {
    if matches!(image::guess_format(buffer), Ok(RasterFormat::Png)) {
        return Ok(Cow::Borrowed(buffer));
    }

    let decoded = image::load_from_memory(buffer).map_err(|e| {
        error!(error = %e, "Failed to decode PNG source");
        CompressionError::new(CompressionErrorKind::Decode(e.to_string()))
    })?;
    debug!(
        width = decoded.width(),
        height = decoded.height(),
        "Converting source raster to PNG"
    );

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), RasterFormat::Png)
        .map_err(|e| {
            error!(error = %e, "Failed to write intermediate PNG");
            CompressionError::new(CompressionErrorKind::Encode(e.to_string()))
        })?;
    Ok(Cow::Owned(png))
}

/// Recompress a buffer as PNG.
///
/// PNG input keeps its pixels exactly; any other decodable raster is converted first.
pub(crate) fn optimize(
    buffer: &[u8],
    profile: &PngProfile,
    timeout: Option<Duration>,
    max_decompressed_size: Option<usize>,
) -> Result<Vec<u8>, CompressionError> {
    debug!(level = profile.compression_level, "Optimizing PNG");
    let source = as_png(buffer)?;
    let options = options(profile, timeout, max_decompressed_size);
    optimize_from_memory(&source, &options).map_err(|e| {
        error!(error = %e, "oxipng failed");
        CompressionError::new(CompressionErrorKind::Optimize(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_profile_tries_several_filters() {
        let options = options(&PngProfile::default(), None, None);
        assert!(options.filters.len() > 1);
        assert!(matches!(options.strip, StripChunks::Safe));
    }

    #[test]
    fn fixed_filter_profile_uses_none_only() {
        let profile = PngProfile {
            compression_level: 2,
            adaptive_filtering: false,
        };
        let options = options(&profile, None, None);
        assert_eq!(options.filters.len(), 1);
        assert!(options.filters.contains(&FilterStrategy::Basic(RowFilter::None)));
    }

    #[test]
    fn png_input_is_borrowed_as_is() {
        let mut png = Vec::new();
        image::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut Cursor::new(&mut png), RasterFormat::Png)
            .unwrap();
        assert!(matches!(as_png(&png).unwrap(), Cow::Borrowed(_)));
    }

    #[test]
    fn undecodable_input_is_a_decode_error() {
        let err = as_png(b"definitely not an image").unwrap_err();
        assert!(matches!(err.kind, CompressionErrorKind::Decode(_)));
    }
}

//! Normalized image formats and their encoding profiles.

use serde::{Deserialize, Serialize};
use sfumato_error::FormatError;

/// JPEG quality used for every re-encode.
///
/// Near-lossless rather than lossless: 95 keeps artifacts invisible while
/// still shrinking most camera output.
pub const JPEG_QUALITY: u8 = 95;

/// Highest oxipng optimization preset.
pub const PNG_COMPRESSION_LEVEL: u8 = 6;

/// A supported, normalized raster format.
///
/// # Examples
///
/// ```
/// use sfumato_core::ImageFormat;
///
/// let format = ImageFormat::from_media_type("image/jpg").unwrap();
/// assert_eq!(format, ImageFormat::Jpeg);
/// assert_eq!(format.extension(), "jpg");
/// assert!(ImageFormat::from_media_type("image/gif").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG (declared as `image/jpeg` or `image/jpg`)
    #[display("jpeg")]
    Jpeg,
    /// PNG
    #[display("png")]
    Png,
}

impl ImageFormat {
    /// Derive the normalized format from a declared media type.
    ///
    /// Matching ignores ASCII case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] for anything outside `image/jpeg`, `image/jpg`
    /// and `image/png`.
    #[track_caller]
    pub fn from_media_type(media_type: &str) -> Result<Self, FormatError> {
        match media_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(ImageFormat::Jpeg),
            "image/png" => Ok(ImageFormat::Png),
            _ => Err(FormatError::new(media_type)),
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    /// MIME type used in responses.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// The encoding profile that applies to this format.
    pub fn profile(&self) -> EncodingProfile {
        match self {
            ImageFormat::Jpeg => EncodingProfile::Jpeg(JpegProfile::default()),
            ImageFormat::Png => EncodingProfile::Png(PngProfile::default()),
        }
    }
}

/// Quality parameters for JPEG output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JpegProfile {
    /// Quality level (1-100)
    pub quality: u8,
    /// Use the perceptually tuned encoder (trellis quantization, optimized coding)
    pub perceptual: bool,
    /// Emit a progressive scan script
    pub progressive: bool,
}

impl Default for JpegProfile {
    fn default() -> Self {
        Self {
            quality: JPEG_QUALITY,
            perceptual: true,
            progressive: true,
        }
    }
}

/// Compression parameters for lossless PNG output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PngProfile {
    /// Optimizer preset (0-6)
    pub compression_level: u8,
    /// Try per-row adaptive filter heuristics
    pub adaptive_filtering: bool,
}

impl Default for PngProfile {
    fn default() -> Self {
        Self {
            compression_level: PNG_COMPRESSION_LEVEL,
            adaptive_filtering: true,
        }
    }
}

/// Encoding parameters keyed by normalized format.
///
/// Exactly one profile exists per [`ImageFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum EncodingProfile {
    /// JPEG parameters
    Jpeg(JpegProfile),
    /// PNG parameters
    Png(PngProfile),
}

impl EncodingProfile {
    /// The format this profile encodes to.
    pub fn format(&self) -> ImageFormat {
        match self {
            EncodingProfile::Jpeg(_) => ImageFormat::Jpeg,
            EncodingProfile::Png(_) => ImageFormat::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn parses_accepted_media_types() {
        assert_eq!(ImageFormat::from_media_type("image/jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_media_type("image/jpg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_media_type(" IMAGE/PNG ").unwrap(), ImageFormat::Png);
    }

    #[test]
    fn rejects_other_media_types() {
        for media_type in ["image/gif", "image/webp", "application/pdf", ""] {
            let err = ImageFormat::from_media_type(media_type).unwrap_err();
            assert_eq!(err.media_type, media_type);
        }
    }

    #[test]
    fn every_format_has_matching_profile() {
        for format in ImageFormat::iter() {
            assert_eq!(format.profile().format(), format);
        }
    }

    #[test]
    fn jpeg_profile_is_near_lossless_progressive() {
        let EncodingProfile::Jpeg(profile) = ImageFormat::Jpeg.profile() else {
            panic!("jpeg format produced a non-jpeg profile");
        };
        assert_eq!(profile.quality, 95);
        assert!(profile.perceptual);
        assert!(profile.progressive);
    }

    #[test]
    fn extensions_and_mime_types() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.to_string(), "png");
    }
}

//! Per-item outcomes: processed images and processing failures.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Percentage size reduction of an encoded image relative to its source.
///
/// Displays with two decimals. Negative when re-encoding grew the file, which
/// happens with small or already optimized inputs.
///
/// # Examples
///
/// ```
/// use sfumato_core::CompressionRatio;
///
/// assert_eq!(CompressionRatio::between(1_000_000, 500_000).to_string(), "50.00");
/// assert_eq!(CompressionRatio::between(100, 150).to_string(), "-50.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct CompressionRatio(f64);

impl CompressionRatio {
    /// Compute `(original - encoded) / original * 100`.
    ///
    /// An empty original yields `0.00`.
    pub fn between(original_size: usize, encoded_size: usize) -> Self {
        if original_size == 0 {
            return Self(0.0);
        }
        let original = original_size as f64;
        let encoded = encoded_size as f64;
        Self((original - encoded) / original * 100.0)
    }

    /// The unrounded percentage.
    pub fn percent(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for CompressionRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for CompressionRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompressionRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse::<f64>()
            .map(CompressionRatio)
            .map_err(serde::de::Error::custom)
    }
}

/// A successfully processed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    /// Display name of the source image
    pub original_name: String,
    /// Synthesized SEO filename, extension included
    pub optimized_name: String,
    /// Re-encoded bytes
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Content description used for the filename
    pub description: String,
    /// Keyword assigned to this image
    pub keyword: String,
    /// Source byte length
    pub original_size: usize,
    /// Encoded byte length
    pub optimized_size: usize,
    /// Size reduction in percent
    pub compression_ratio: CompressionRatio,
}

/// A per-item failure recorded instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingFailure {
    /// Display name of the source image
    pub original_name: String,
    /// Human-readable reason
    pub error: String,
}

impl ProcessingFailure {
    /// Create a failure record.
    pub fn new(original_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            error: error.into(),
        }
    }
}

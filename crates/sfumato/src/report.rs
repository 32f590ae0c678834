//! JSON response shape for a processed batch.

use base64::{Engine as _, engine::general_purpose};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use sfumato_archive::content_type_for;
use sfumato_core::{BatchResult, CompressionRatio, ProcessedImage, ProcessingFailure};

/// One processed image with its bytes inlined as base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ReportedImage {
    original_name: String,
    optimized_name: String,
    description: String,
    keyword: String,
    original_size: usize,
    optimized_size: usize,
    compression_ratio: CompressionRatio,
    content_type: String,
    /// Standard base64 of the encoded image
    data: String,
}

impl ReportedImage {
    /// Decode the inlined image bytes.
    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(&self.data)
    }
}

impl From<&ProcessedImage> for ReportedImage {
    fn from(image: &ProcessedImage) -> Self {
        Self {
            original_name: image.original_name.clone(),
            optimized_name: image.optimized_name.clone(),
            description: image.description.clone(),
            keyword: image.keyword.clone(),
            original_size: image.original_size,
            optimized_size: image.optimized_size,
            compression_ratio: image.compression_ratio,
            content_type: content_type_for(&image.optimized_name).to_string(),
            data: general_purpose::STANDARD.encode(&image.data),
        }
    }
}

/// Serializable view of a [`BatchResult`].
///
/// A partial failure keeps every successful image and lists the failures
/// next to them; `success` is false as soon as one item failed.
///
/// # Examples
///
/// ```
/// use sfumato::{BatchReport, BatchResult, ProcessingFailure};
///
/// let result = BatchResult::from_outcomes(vec![], vec![ProcessingFailure::new("a.gif", "unsupported")]);
/// let report = BatchReport::from(&result);
/// assert!(!report.success());
/// assert_eq!(report.failures()[0].original_name, "a.gif");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    #[getter(skip)]
    success: bool,
    total_processed: usize,
    total_failed: usize,
    processed: Vec<ReportedImage>,
    failures: Vec<ProcessingFailure>,
}

impl BatchReport {
    /// True only when no item failed.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&BatchResult> for BatchReport {
    fn from(result: &BatchResult) -> Self {
        Self {
            success: result.success(),
            total_processed: *result.total_processed(),
            total_failed: *result.total_failed(),
            processed: result.processed().iter().map(ReportedImage::from).collect(),
            failures: result.failures().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> ProcessedImage {
        ProcessedImage {
            original_name: "DSC_0042.JPG".to_string(),
            optimized_name: "boots-brown-leather-hiking-boots.jpg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF, 0xE0],
            description: "brown leather hiking boots".to_string(),
            keyword: "boots".to_string(),
            original_size: 8,
            optimized_size: 4,
            compression_ratio: CompressionRatio::between(8, 4),
        }
    }

    #[test]
    fn image_bytes_are_base64() {
        let reported = ReportedImage::from(&image());
        assert_eq!(reported.data(), "/9j/4A==");
        assert_eq!(reported.decode_data().unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(reported.content_type(), "image/jpeg");
    }

    #[test]
    fn report_json_uses_camel_case() {
        let result = BatchResult::from_outcomes(
            vec![image()],
            vec![ProcessingFailure::new("logo.gif", "Unsupported image format: image/gif")],
        );
        let json = serde_json::to_value(BatchReport::from(&result)).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["totalProcessed"], 1);
        assert_eq!(json["totalFailed"], 1);
        assert_eq!(json["processed"][0]["compressionRatio"], "50.00");
        assert_eq!(json["processed"][0]["data"], "/9j/4A==");
        assert_eq!(json["failures"][0]["originalName"], "logo.gif");
    }
}

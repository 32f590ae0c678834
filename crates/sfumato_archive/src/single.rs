//! Single-image download metadata.

use derive_getters::Getters;
use sfumato_core::ProcessedImage;

/// Content type derived from a filename's extension.
///
/// `.jpg` and `.jpeg` (any case) are JPEG; everything else is PNG.
pub fn content_type_for(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        "image/png"
    }
}

/// ASCII-safe stand-in for a filename in a quoted header parameter.
///
/// Non-ASCII, control characters, quotes and backslashes become `_`.
pub fn ascii_fallback(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `Content-Disposition` value carrying both an ASCII and a UTF-8 filename.
///
/// ```
/// use sfumato_archive::content_disposition;
///
/// assert_eq!(
///     content_disposition("café.jpg"),
///     "attachment; filename=\"caf_.jpg\"; filename*=UTF-8''caf%C3%A9.jpg"
/// );
/// ```
pub fn content_disposition(name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(name),
        urlencoding::encode(name)
    )
}

/// One processed image ready to send as a file download.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SingleDownload {
    /// Encoded image bytes
    bytes: Vec<u8>,
    /// Filename offered to the client
    filename: String,
    /// `Content-Type` header value
    #[getter(skip)]
    content_type: &'static str,
    /// `Content-Disposition` header value
    content_disposition: String,
}

impl SingleDownload {
    /// Prepare `bytes` for download under `filename`.
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            content_type: content_type_for(&filename),
            content_disposition: content_disposition(&filename),
            bytes,
            filename,
        }
    }

    /// Prepare a processed image under its optimized name.
    pub fn from_processed(image: &ProcessedImage) -> Self {
        Self::new(image.data.clone(), image.optimized_name.clone())
    }

    /// Take the body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// `Content-Type` header value
    pub fn content_type(&self) -> &&'static str {
        &self.content_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_family_is_case_insensitive() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("A.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("no-extension"), "image/png");
    }

    #[test]
    fn fallback_replaces_unsafe_characters() {
        assert_eq!(ascii_fallback("日本.png"), "__.png");
        assert_eq!(ascii_fallback("a\"b\\c\n.jpg"), "a_b_c_.jpg");
        assert_eq!(ascii_fallback("plain-name.jpg"), "plain-name.jpg");
    }

    #[test]
    fn disposition_percent_encodes_utf8() {
        let header = content_disposition("日本.png");
        assert!(header.starts_with("attachment; filename=\"__.png\""));
        assert!(header.ends_with("filename*=UTF-8''%E6%97%A5%E6%9C%AC.png"));
    }

    #[test]
    fn single_download_from_name() {
        let download = SingleDownload::new(vec![1, 2, 3], "red-shoe.jpg");
        assert_eq!(*download.content_type(), "image/jpeg");
        assert_eq!(
            download.content_disposition(),
            "attachment; filename=\"red-shoe.jpg\"; filename*=UTF-8''red-shoe.jpg"
        );
        assert_eq!(download.into_bytes(), vec![1, 2, 3]);
    }
}

//! Input images as handed over by the upload layer.

use derive_getters::Getters;

/// An immutable input unit.
///
/// Built by the upload collaborator after it has validated size and media type.
/// The pipeline re-derives the format from `media_type` but never re-checks size.
///
/// # Examples
///
/// ```
/// use sfumato_core::SourceImage;
///
/// let image = SourceImage::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg", "IMG_0042.JPG");
/// assert_eq!(*image.size(), 3);
/// assert_eq!(image.original_name(), "IMG_0042.JPG");
/// ```
#[derive(Clone, PartialEq, Eq, Getters)]
pub struct SourceImage {
    /// Raw encoded bytes as uploaded
    bytes: Vec<u8>,
    /// Declared media type, e.g. `image/png`
    media_type: String,
    /// Original display name
    original_name: String,
    /// Byte length of `bytes`
    size: usize,
}

impl SourceImage {
    /// Create a source image; the size is taken from the buffer.
    pub fn new(
        bytes: Vec<u8>,
        media_type: impl Into<String>,
        original_name: impl Into<String>,
    ) -> Self {
        let size = bytes.len();
        Self {
            bytes,
            media_type: media_type.into(),
            original_name: original_name.into(),
            size,
        }
    }

    /// Split into the owned buffer, declared media type and name.
    pub fn into_parts(self) -> (Vec<u8>, String, String) {
        (self.bytes, self.media_type, self.original_name)
    }
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("original_name", &self.original_name)
            .field("media_type", &self.media_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

//! Reading uploads from disk into source images.

use sfumato_core::SourceImage;
use sfumato_error::{UploadError, UploadErrorKind};
use std::path::Path;
use tracing::{debug, instrument};

/// Declared media type for a file, from its extension.
///
/// Unknown extensions map to `application/octet-stream` so the pipeline can
/// report them as unsupported per item.
///
/// ```
/// use sfumato::media_type_for_path;
///
/// assert_eq!(media_type_for_path("shoe.JPG"), "image/jpeg");
/// assert_eq!(media_type_for_path("logo.gif"), "image/gif");
/// ```
pub fn media_type_for_path(path: impl AsRef<Path>) -> &'static str {
    let extension = path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Read one file as an upload, refusing it when larger than `max_bytes`.
///
/// # Errors
///
/// [`UploadErrorKind::Read`] if the file cannot be read and
/// [`UploadErrorKind::TooLarge`] if it exceeds the cap.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub async fn read_upload(
    path: impl AsRef<Path>,
    max_bytes: usize,
) -> Result<SourceImage, UploadError> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let read_error = |e: std::io::Error| {
        UploadError::new(UploadErrorKind::Read {
            name: name.clone(),
            message: e.to_string(),
        })
    };

    let size = tokio::fs::metadata(path).await.map_err(read_error)?.len();
    if size > max_bytes as u64 {
        return Err(UploadError::new(UploadErrorKind::TooLarge {
            name,
            size,
            limit: max_bytes,
        }));
    }

    let bytes = tokio::fs::read(path).await.map_err(read_error)?;
    let media_type = media_type_for_path(path);
    debug!(name = %name, size = bytes.len(), media_type, "Read upload");
    Ok(SourceImage::new(bytes, media_type, name))
}

/// Read every path in order.
///
/// # Errors
///
/// Fails on the first unreadable or oversized file, or when `paths` is empty.
pub async fn read_uploads<P: AsRef<Path>>(
    paths: &[P],
    max_bytes: usize,
) -> Result<Vec<SourceImage>, UploadError> {
    if paths.is_empty() {
        return Err(UploadError::new(UploadErrorKind::Empty));
    }

    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        images.push(read_upload(path, max_bytes).await?);
    }
    Ok(images)
}

/// Human-readable byte count.
///
/// ```
/// use sfumato::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(1536), "1.50 KB");
/// ```
pub fn format_file_size(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f = bytes as f64;
    let unit_index = (bytes_f.log(THRESHOLD) as usize).min(UNITS.len() - 1);
    let size = bytes_f / THRESHOLD.powi(unit_index as i32);

    format!("{:.2} {}", size, UNITS[unit_index])
}

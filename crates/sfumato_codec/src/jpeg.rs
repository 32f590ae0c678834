//! JPEG re-compression through mozjpeg.

use sfumato_core::JpegProfile;
use sfumato_error::{CompressionError, CompressionErrorKind};
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error};

/// Decode `buffer` and re-encode it as JPEG under `profile`.
///
/// Any decodable raster is accepted; alpha is dropped by converting to RGB8.
pub(crate) fn encode(buffer: &[u8], profile: &JpegProfile) -> Result<Vec<u8>, CompressionError> {
    let decoded = image::load_from_memory(buffer).map_err(|e| {
        error!(error = %e, "Failed to decode JPEG source");
        CompressionError::new(CompressionErrorKind::Decode(e.to_string()))
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!(width, height, quality = profile.quality, "Compressing JPEG");

    // mozjpeg reports libjpeg errors by unwinding
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        compress(rgb.as_raw(), width as usize, height as usize, profile)
    }));

    match outcome {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => {
            error!(error = %e, "mozjpeg rejected pixel data");
            Err(CompressionError::new(CompressionErrorKind::Encode(
                e.to_string(),
            )))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!(message = %message, "mozjpeg aborted");
            Err(CompressionError::new(CompressionErrorKind::Panicked(message)))
        }
    }
}

fn compress(
    pixels: &[u8],
    width: usize,
    height: usize,
    profile: &JpegProfile,
) -> std::io::Result<Vec<u8>> {
    let mut compress = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_RGB);
    compress.set_size(width, height);
    compress.set_quality(f32::from(profile.quality));
    if profile.progressive {
        compress.set_progressive_mode();
    }
    compress.set_optimize_coding(profile.perceptual);
    compress.set_optimize_scans(profile.perceptual && profile.progressive);

    let mut started = compress.start_compress(Vec::new())?;
    started.write_scanlines(pixels)?;
    started.finish()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown encoder failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_message_reads_string_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("Bogus marker length");
        assert_eq!(panic_message(payload.as_ref()), "Bogus marker length");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("Corrupt JPEG"));
        assert_eq!(panic_message(payload.as_ref()), "Corrupt JPEG");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown encoder failure");
    }

    #[test]
    fn garbage_input_is_a_decode_error() {
        let err = encode(b"definitely not a jpeg", &JpegProfile::default()).unwrap_err();
        assert!(matches!(err.kind(), CompressionErrorKind::Decode(_)));
    }
}

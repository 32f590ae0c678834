//! Fake capabilities for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use sfumato_core::{EncodingProfile, SourceImage};
use sfumato_error::{CompressionError, CompressionErrorKind, VisionError, VisionErrorKind};
use sfumato_interface::{Codec, VisionDriver, VisionRequest};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Buffers starting with this prefix make [`FakeCodec`] fail.
pub const FAIL_MARKER: &[u8] = b"FAIL";

/// Buffers starting with this prefix make [`FakeCodec`] sleep first.
pub const SLOW_MARKER: &[u8] = b"SLOW";

/// Codec that halves its input, fails on [`FAIL_MARKER`] and stalls on [`SLOW_MARKER`].
#[derive(Debug, Default)]
pub struct FakeCodec {
    pub calls: AtomicUsize,
}

impl Codec for FakeCodec {
    fn encode(&self, buffer: &[u8], _profile: &EncodingProfile) -> Result<Vec<u8>, CompressionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if buffer.starts_with(FAIL_MARKER) {
            return Err(CompressionError::new(CompressionErrorKind::Encode(
                "forced failure".to_string(),
            )));
        }
        if buffer.starts_with(SLOW_MARKER) {
            std::thread::sleep(Duration::from_millis(200));
        }
        Ok(buffer[..buffer.len() / 2].to_vec())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Driver answering with a fixed text.
#[derive(Debug)]
pub struct FixedDriver {
    pub text: String,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<VisionRequest>>,
}

impl FixedDriver {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl VisionDriver for FixedDriver {
    async fn describe_image(&self, request: &VisionRequest) -> Result<String, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        Ok(self.text.clone())
    }

    fn provider_name(&self) -> &'static str {
        "fixed"
    }

    fn model_name(&self) -> &str {
        "fixed-model"
    }
}

/// Driver that always fails with the given kind.
#[derive(Debug)]
pub struct FailingDriver {
    pub kind: VisionErrorKind,
}

#[async_trait]
impl VisionDriver for FailingDriver {
    async fn describe_image(&self, _request: &VisionRequest) -> Result<String, VisionError> {
        Err(VisionError::new(self.kind.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}

/// Driver that tracks peak concurrency while sleeping.
#[derive(Debug, Default)]
pub struct ConcurrencyProbe {
    pub active: AtomicUsize,
    pub peak: AtomicUsize,
}

#[async_trait]
impl VisionDriver for ConcurrencyProbe {
    async fn describe_image(&self, _request: &VisionRequest) -> Result<String, VisionError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok("probe".to_string())
    }

    fn provider_name(&self) -> &'static str {
        "probe"
    }

    fn model_name(&self) -> &str {
        "probe-model"
    }
}

/// A PNG-declared source image with the given bytes.
pub fn png(name: &str, bytes: &[u8]) -> SourceImage {
    SourceImage::new(bytes.to_vec(), "image/png", name)
}

/// A JPEG-declared source image with the given bytes.
pub fn jpeg(name: &str, bytes: &[u8]) -> SourceImage {
    SourceImage::new(bytes.to_vec(), "image/jpeg", name)
}

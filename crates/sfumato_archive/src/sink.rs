//! Output sink with an explicit "response has begun" guard.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared view of how many bytes a [`DownloadSink`] has accepted.
#[derive(Debug, Clone, Default)]
pub struct SinkProgress(Arc<AtomicU64>);

impl SinkProgress {
    /// Bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Whether any byte reached the underlying writer.
    pub fn has_begun(&self) -> bool {
        self.bytes_written() > 0
    }
}

/// Wraps the response writer and counts accepted bytes.
///
/// Once [`has_begun`](Self::has_begun) is true the response is in flight and
/// whole-operation errors can no longer be reported to the client.
#[derive(Debug)]
pub struct DownloadSink<W> {
    inner: W,
    progress: SinkProgress,
}

impl<W> DownloadSink<W> {
    /// Wrap a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            progress: SinkProgress::default(),
        }
    }

    /// Whether any byte reached the underlying writer.
    pub fn has_begun(&self) -> bool {
        self.progress.has_begun()
    }

    /// Bytes accepted so far.
    pub fn bytes_written(&self) -> u64 {
        self.progress.bytes_written()
    }

    /// A handle that observes progress while the sink is mutably borrowed.
    pub fn progress(&self) -> SinkProgress {
        self.progress.clone()
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for DownloadSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.progress.0.fetch_add(written as u64, Ordering::SeqCst);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accepted_bytes() {
        let mut sink = DownloadSink::new(Vec::new());
        let progress = sink.progress();
        assert!(!sink.has_begun());

        sink.write_all(b"PK").unwrap();

        assert!(sink.has_begun());
        assert_eq!(progress.bytes_written(), 2);
        assert_eq!(sink.into_inner(), b"PK");
    }

    #[test]
    fn empty_writes_do_not_begin() {
        let mut sink = DownloadSink::new(Vec::new());
        sink.write_all(&[]).unwrap();
        sink.flush().unwrap();
        assert!(!sink.has_begun());
    }
}

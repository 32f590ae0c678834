//! Tests for zip packaging and single-file downloads.

use sfumato_archive::{
    ArchiveEntry, ArchivePackager, DownloadSink, SingleDownload, content_type_for,
};
use sfumato_core::{CompressionRatio, ProcessedImage};
use sfumato_error::PackagingErrorKind;
use std::io::{self, Cursor, Read, Write};

/// Accepts `budget` bytes, then fails every write. Cannot seek.
struct FailingWriter {
    inner: Cursor<Vec<u8>>,
    budget: usize,
}

impl FailingWriter {
    fn after(budget: usize) -> Self {
        Self {
            inner: Cursor::new(Vec::new()),
            budget,
        }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        self.inner.write(&buf[..n])
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn read_back(bytes: Vec<u8>) -> anyhow::Result<Vec<(String, Vec<u8>)>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut files = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        files.push((file.name().to_string(), data));
    }
    Ok(files)
}

fn processed(name: &str, data: &[u8]) -> ProcessedImage {
    ProcessedImage {
        original_name: "upload.png".to_string(),
        optimized_name: name.to_string(),
        data: data.to_vec(),
        description: "red canvas sneaker".to_string(),
        keyword: "sneaker".to_string(),
        original_size: data.len() * 2,
        optimized_size: data.len(),
        compression_ratio: CompressionRatio::between(data.len() * 2, data.len()),
    }
}

#[test]
fn entries_keep_input_order_and_contents() -> anyhow::Result<()> {
    let images = vec![
        processed("c-third.png", b"third image"),
        processed("a-first.jpg", b"first image"),
        processed("b-second.png", &[0u8; 4096]),
    ];

    let (bytes, summary) = ArchivePackager::default()
        .build_archive(images.iter().map(ArchiveEntry::from))?;

    assert!(*summary.finalized());
    assert!(summary.skipped().is_empty());
    assert_eq!(*summary.bytes_written(), bytes.len() as u64);

    let files = read_back(bytes)?;
    let names: Vec<_> = files.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["c-third.png", "a-first.jpg", "b-second.png"]);
    assert_eq!(files[1].1, b"first image");
    assert_eq!(files[2].1, vec![0u8; 4096]);
    Ok(())
}

/// A forward-only writer, like a response body or a pipe.
#[derive(Default)]
struct Pipe {
    received: Vec<u8>,
    writes: usize,
}

impl Write for Pipe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes += 1;
        self.received.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn archive_streams_into_forward_only_writer() -> anyhow::Result<()> {
    let images = vec![
        processed("red-sneaker.jpg", &[7u8; 2048]),
        processed("blue-sneaker.png", b"blue"),
    ];
    let mut sink = DownloadSink::new(Pipe::default());

    let summary = ArchivePackager::default()
        .write_archive(images.iter().map(ArchiveEntry::from), &mut sink)?;

    assert!(*summary.finalized());
    let pipe = sink.into_inner();
    assert!(pipe.writes > 1);
    assert_eq!(*summary.bytes_written(), pipe.received.len() as u64);

    let files = read_back(pipe.received)?;
    assert_eq!(files[0], ("red-sneaker.jpg".to_string(), vec![7u8; 2048]));
    assert_eq!(files[1], ("blue-sneaker.png".to_string(), b"blue".to_vec()));
    Ok(())
}

#[test]
fn duplicate_name_is_skipped_and_archive_completes() -> anyhow::Result<()> {
    let entries = vec![
        ArchiveEntry::new("shoe.jpg", b"one"),
        ArchiveEntry::new("bag.png", b"two"),
        ArchiveEntry::new("shoe.jpg", b"three"),
    ];

    let (bytes, summary) = ArchivePackager::default().build_archive(entries)?;

    assert_eq!(summary.written(), &["shoe.jpg", "bag.png"]);
    assert_eq!(summary.skipped().len(), 1);
    assert_eq!(summary.skipped()[0].name(), "shoe.jpg");

    let files = read_back(bytes)?;
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].1, b"one");
    Ok(())
}

#[test]
fn empty_input_still_produces_valid_archive() -> anyhow::Result<()> {
    let (bytes, summary) = ArchivePackager::default().build_archive(Vec::new())?;
    assert!(*summary.finalized());
    assert!(summary.written().is_empty());
    assert!(read_back(bytes)?.is_empty());
    Ok(())
}

#[test]
fn stored_level_is_accepted() -> anyhow::Result<()> {
    let (bytes, _) =
        ArchivePackager::new(0).build_archive(vec![ArchiveEntry::new("a.png", b"abc")])?;
    assert_eq!(read_back(bytes)?[0].1, b"abc");
    Ok(())
}

#[test]
fn setup_failure_leaves_sink_untouched() {
    let mut sink = DownloadSink::new(Vec::new());
    let err = ArchivePackager::new(42)
        .write_archive(vec![ArchiveEntry::new("a.png", b"abc")], &mut sink)
        .unwrap_err();

    assert!(matches!(err.kind, PackagingErrorKind::Setup(_)));
    assert!(!sink.has_begun());
    assert!(sink.into_inner().is_empty());
}

#[test]
fn failure_before_first_byte_is_an_error() {
    let mut sink = DownloadSink::new(FailingWriter::after(0));
    let err = ArchivePackager::default()
        .write_archive(vec![ArchiveEntry::new("a.png", b"abc")], &mut sink)
        .unwrap_err();

    assert!(matches!(err.kind, PackagingErrorKind::Finalize(_)));
    assert!(!sink.has_begun());
}

#[test]
fn failure_after_response_began_is_reported_not_raised() {
    let mut sink = DownloadSink::new(FailingWriter::after(10));
    let summary = ArchivePackager::default()
        .write_archive(
            vec![
                ArchiveEntry::new("a.png", b"first"),
                ArchiveEntry::new("b.png", b"second"),
            ],
            &mut sink,
        )
        .unwrap();

    assert!(!*summary.finalized());
    assert_eq!(*summary.bytes_written(), 10);
    assert!(sink.has_begun());
}

#[test]
fn build_archive_surfaces_setup_errors() {
    let err = ArchivePackager::new(-1).build_archive(Vec::new()).unwrap_err();
    assert!(matches!(err.kind, PackagingErrorKind::Setup(_)));
}

#[test]
fn single_download_from_processed_image() {
    let image = processed("red-canvas-sneaker.JPG", b"jpeg");
    let download = SingleDownload::from_processed(&image);

    assert_eq!(download.filename(), "red-canvas-sneaker.JPG");
    assert_eq!(*download.content_type(), "image/jpeg");
    assert_eq!(
        download.content_disposition(),
        "attachment; filename=\"red-canvas-sneaker.JPG\"; filename*=UTF-8''red-canvas-sneaker.JPG"
    );
    assert_eq!(download.into_bytes(), b"jpeg");
}

#[test]
fn non_ascii_filename_gets_both_forms() {
    let download = SingleDownload::new(vec![1, 2], "naïve \"art\".png");

    assert_eq!(*download.content_type(), "image/png");
    assert_eq!(
        download.content_disposition(),
        "attachment; filename=\"na_ve _art_.png\"; filename*=UTF-8''na%C3%AFve%20%22art%22.png"
    );
}

#[test]
fn content_type_defaults_to_png() {
    assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
    assert_eq!(content_type_for("photo.webp"), "image/png");
    assert_eq!(content_type_for("no-extension"), "image/png");
}

#[test]
fn summary_serializes_for_reports() -> anyhow::Result<()> {
    let (_, summary) =
        ArchivePackager::default().build_archive(vec![ArchiveEntry::new("a.png", b"x")])?;
    let json = serde_json::to_value(&summary)?;
    assert_eq!(json["written"][0], "a.png");
    assert_eq!(json["finalized"], true);
    Ok(())
}

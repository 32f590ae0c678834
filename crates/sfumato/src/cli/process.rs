//! Batch processing command handler.

use sfumato::{
    ArchiveEntry, ArchivePackager, BatchOrchestrator, BatchReport, BatchResult, DownloadSink,
    Keywords, PackagingError, PackagingErrorKind, SfumatoConfig, SfumatoResult, UploadError,
    UploadErrorKind, format_file_size, read_uploads,
};
use std::collections::HashSet;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Where the batch output goes.
#[derive(Debug, Default)]
pub struct ProcessTargets {
    /// Directory for individual files
    pub out: Option<PathBuf>,
    /// Zip archive path
    pub zip: Option<PathBuf>,
    /// JSON report path
    pub report: Option<PathBuf>,
}

/// Run a batch and write its outputs. Returns whether every item succeeded.
#[instrument(skip_all, fields(files = files.len()))]
pub async fn run_process(
    config: &SfumatoConfig,
    files: &[PathBuf],
    keywords: Vec<String>,
    keywords_file: Option<&Path>,
    targets: ProcessTargets,
) -> SfumatoResult<bool> {
    let keywords = load_keywords(keywords, keywords_file).await?;
    let images = read_uploads(files, config.pipeline.max_upload_bytes).await?;

    let orchestrator = BatchOrchestrator::from_config(config);
    let result = orchestrator.process_batch(images, &keywords).await;
    print_summary(&result);

    if let Some(path) = &targets.report {
        write_report(&result, path).await?;
    }
    if let Some(dir) = &targets.out {
        write_files(&result, dir).await?;
    }
    let success = result.success();
    if let Some(path) = targets.zip {
        write_zip(result, path, config.archive.compression_level).await?;
    }

    Ok(success)
}

async fn load_keywords(
    mut values: Vec<String>,
    file: Option<&Path>,
) -> Result<Keywords, UploadError> {
    if let Some(file) = file {
        let raw = tokio::fs::read_to_string(file).await.map_err(|e| {
            UploadError::new(UploadErrorKind::Read {
                name: file.display().to_string(),
                message: e.to_string(),
            })
        })?;
        return Ok(Keywords::Delimited(raw));
    }

    Ok(match values.len() {
        1 => Keywords::Delimited(values.remove(0)),
        _ => Keywords::List(values),
    })
}

fn print_summary(result: &BatchResult) {
    for image in result.processed() {
        println!(
            "{} -> {} ({} -> {}, {}% smaller)",
            image.original_name,
            image.optimized_name,
            format_file_size(image.original_size),
            format_file_size(image.optimized_size),
            image.compression_ratio
        );
    }
    for failure in result.failures() {
        eprintln!("{} failed: {}", failure.original_name, failure.error);
    }
    println!(
        "{} processed, {} failed",
        result.total_processed(),
        result.total_failed()
    );
}

fn io_error(context: &str, path: &Path, e: impl std::fmt::Display) -> PackagingError {
    PackagingError::new(PackagingErrorKind::Io(format!(
        "{} {}: {}",
        context,
        path.display(),
        e
    )))
}

async fn write_report(result: &BatchResult, path: &Path) -> Result<(), PackagingError> {
    let json = BatchReport::from(result)
        .to_json_pretty()
        .map_err(|e| io_error("Failed to serialize report for", path, e))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| io_error("Failed to write report", path, e))?;
    info!(path = %path.display(), "Wrote batch report");
    Ok(())
}

async fn write_files(result: &BatchResult, dir: &Path) -> Result<(), PackagingError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| io_error("Failed to create", dir, e))?;

    let mut seen = HashSet::new();
    for image in result.processed() {
        if !seen.insert(image.optimized_name.as_str()) {
            warn!(name = %image.optimized_name, "Duplicate output name, later image overwrites earlier");
        }
        let path = dir.join(&image.optimized_name);
        tokio::fs::write(&path, &image.data)
            .await
            .map_err(|e| io_error("Failed to write", &path, e))?;
    }
    info!(dir = %dir.display(), count = result.processed().len(), "Wrote processed images");
    Ok(())
}

async fn write_zip(result: BatchResult, path: PathBuf, level: i64) -> Result<(), PackagingError> {
    let images = result.into_processed();
    let task_path = path.clone();

    let summary = tokio::task::spawn_blocking(move || {
        let file = std::fs::File::create(&task_path)
            .map_err(|e| io_error("Failed to create", &task_path, e))?;
        let mut sink = DownloadSink::new(BufWriter::new(file));
        ArchivePackager::new(level).write_archive(images.iter().map(ArchiveEntry::from), &mut sink)
    })
    .await
    .map_err(|e| io_error("Archive task failed for", &path, e))??;

    if !*summary.finalized() {
        return Err(PackagingError::new(PackagingErrorKind::Finalize(format!(
            "{} is truncated after {} bytes",
            path.display(),
            summary.bytes_written()
        ))));
    }
    info!(
        path = %path.display(),
        entries = summary.written().len(),
        skipped = summary.skipped().len(),
        "Wrote archive"
    );
    Ok(())
}

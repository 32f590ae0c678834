//! Sfumato - SEO image asset pipeline
//!
//! Sfumato takes a batch of product images plus marketing keywords and returns
//! smaller, re-encoded images with search-friendly filenames built from a
//! keyword and a short machine-generated description of each image.
//!
//! # Features
//!
//! - **Re-encoding**: progressive MozJPEG at quality 95, lossless oxipng for PNG
//! - **Descriptions**: OpenAI-compatible or Gemini vision back-ends, with fixed
//!   fallbacks when unconfigured or failing
//! - **Batching**: bounded concurrency, per-item failure isolation, input order kept
//! - **Downloads**: single files with safe `Content-Disposition`, or one zip
//!
//! # Quick Start
//!
//! ```no_run
//! use sfumato::{BatchOrchestrator, BatchReport, Keywords, SfumatoConfig, read_uploads};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SfumatoConfig::load()?;
//! let images = read_uploads(&["shoe.jpg"], config.pipeline.max_upload_bytes).await?;
//!
//! let result = BatchOrchestrator::from_config(&config)
//!     .process_batch(images, &Keywords::from("running shoes"))
//!     .await;
//!
//! println!("{}", BatchReport::from(&result).to_json_pretty()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `sfumato_error` - error types
//! - `sfumato_core` - formats, keywords, processed-image and batch data
//! - `sfumato_interface` - `Codec` and `VisionDriver` traits
//! - `sfumato_codec` - MozJPEG and oxipng encoder
//! - `sfumato_models` - vision back-end clients
//! - `sfumato_pipeline` - describer, filename synthesis, batch orchestration
//! - `sfumato_archive` - single-file and zip downloads
//!
//! This crate (`sfumato`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod intake;
mod observability;
mod report;

pub use sfumato_archive::*;
pub use sfumato_codec::*;
pub use sfumato_core::*;
pub use sfumato_error::*;
pub use sfumato_interface::*;
pub use sfumato_models::*;
pub use sfumato_pipeline::*;

pub use intake::{format_file_size, media_type_for_path, read_upload, read_uploads};
pub use observability::{LoggingConfig, init_logging};
pub use report::{BatchReport, ReportedImage};

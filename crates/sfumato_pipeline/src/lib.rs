//! Describe, name and batch-process images for the Sfumato asset pipeline.
//!
//! - [`Describer`] - content descriptions with fixed fallbacks
//! - [`filename`] - SEO filename synthesis
//! - [`ItemProcessor`] - one image through encode, describe and name
//! - [`BatchOrchestrator`] - many images with per-item failure isolation
//! - [`SfumatoConfig`] - layered configuration
//!
//! # Example
//!
//! ```no_run
//! use sfumato_core::{Keywords, SourceImage};
//! use sfumato_pipeline::{BatchOrchestrator, SfumatoConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SfumatoConfig::load()?;
//! let orchestrator = BatchOrchestrator::from_config(&config);
//! let images = vec![SourceImage::new(std::fs::read("shoe.jpg")?, "image/jpeg", "shoe.jpg")];
//! let result = orchestrator.process_batch(images, &Keywords::from("running shoes")).await;
//! println!("{} processed, {} failed", result.total_processed(), result.total_failed());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod describer;
pub mod filename;
mod orchestrator;
mod processor;

pub use config::{ArchiveConfig, DescriberConfig, PipelineConfig, SfumatoConfig, VisionProvider};
pub use describer::{
    DESCRIPTION_PROMPT, Describer, Description, FALLBACK_FAILED, FALLBACK_UNCONFIGURED,
};
pub use orchestrator::BatchOrchestrator;
pub use processor::ItemProcessor;

//! Batch execution with per-item failure isolation.

use crate::{Describer, ItemProcessor, SfumatoConfig};
use futures::StreamExt;
use sfumato_codec::NativeCodec;
use sfumato_core::{BatchResult, Keywords, ProcessingFailure, SourceImage};
use sfumato_interface::Codec;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Drives an [`ItemProcessor`] over a batch.
///
/// Items run concurrently up to the configured width; results keep input
/// order. A failing item becomes a [`ProcessingFailure`] and never stops its
/// siblings.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    processor: ItemProcessor,
    max_concurrent_items: usize,
}

impl BatchOrchestrator {
    /// Create an orchestrator; a width of zero is treated as one.
    pub fn new(processor: ItemProcessor, max_concurrent_items: usize) -> Self {
        Self {
            processor,
            max_concurrent_items: max_concurrent_items.max(1),
        }
    }

    /// Wire the native codec and a configured describer.
    pub fn from_config(config: &SfumatoConfig) -> Self {
        Self::with_codec(config, Arc::new(NativeCodec::default()))
    }

    /// Wire `codec` and a configured describer.
    pub fn with_codec(config: &SfumatoConfig, codec: Arc<dyn Codec>) -> Self {
        let describer = Describer::from_config(&config.describer);
        Self::new(
            ItemProcessor::new(codec, describer),
            config.pipeline.concurrency(),
        )
    }

    /// Effective batch width.
    pub fn max_concurrent_items(&self) -> usize {
        self.max_concurrent_items
    }

    /// Process every image, assigning keywords by position.
    ///
    /// Never fails; per-item errors are reported in the result.
    #[instrument(skip_all, fields(items = images.len(), width = self.max_concurrent_items))]
    pub async fn process_batch(&self, images: Vec<SourceImage>, keywords: &Keywords) -> BatchResult {
        let keywords = keywords.resolve();
        let processor = &self.processor;

        let outcomes: Vec<_> = futures::stream::iter(images.into_iter().enumerate().map(
            |(index, image)| {
                let keyword = keywords.for_index(index).to_string();
                async move { processor.process(image, &keyword).await }
            },
        ))
        .buffered(self.max_concurrent_items)
        .collect()
        .await;

        let mut processed = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(image) => processed.push(image),
                Err(e) => {
                    warn!(name = %e.original_name, error = %e.message(), "Item failed");
                    failures.push(ProcessingFailure::new(e.original_name.clone(), e.message()));
                }
            }
        }

        info!(
            processed = processed.len(),
            failed = failures.len(),
            "Batch complete"
        );
        BatchResult::from_outcomes(processed, failures)
    }
}

//! Aggregated batch outcome.

use crate::{ProcessedImage, ProcessingFailure};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Outcome of one batch invocation.
///
/// `processed` follows input order. `success` is batch-wide: a single failure
/// makes it false even when other items succeeded.
///
/// # Examples
///
/// ```
/// use sfumato_core::{BatchResult, ProcessingFailure};
///
/// let result = BatchResult::from_outcomes(vec![], vec![ProcessingFailure::new("a.gif", "unsupported")]);
/// assert!(!result.success());
/// assert_eq!(*result.total_failed(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Processed images in input order
    processed: Vec<ProcessedImage>,
    /// Failed items
    failures: Vec<ProcessingFailure>,
    /// `processed.len()`
    total_processed: usize,
    /// `failures.len()`
    total_failed: usize,
    #[getter(skip)]
    success: bool,
}

impl BatchResult {
    /// Build a result, deriving counts and the success flag.
    pub fn from_outcomes(processed: Vec<ProcessedImage>, failures: Vec<ProcessingFailure>) -> Self {
        Self {
            total_processed: processed.len(),
            total_failed: failures.len(),
            success: failures.is_empty(),
            processed,
            failures,
        }
    }

    /// True only when no item failed.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Take ownership of the processed images.
    pub fn into_processed(self) -> Vec<ProcessedImage> {
        self.processed
    }
}

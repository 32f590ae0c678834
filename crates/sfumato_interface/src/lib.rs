//! Capability traits for the Sfumato image asset pipeline.
//!
//! The pipeline depends on two external capabilities, both expressed here as
//! traits so that back-ends can be swapped and faked in tests:
//!
//! - [`Codec`] re-encodes an image buffer under an [`EncodingProfile`](sfumato_core::EncodingProfile).
//! - [`VisionDriver`] turns an inline image into a short text description.

mod traits;
mod types;

pub use traits::{Codec, VisionDriver};
pub use types::{ImageDetail, VisionRequest, VisionRequestBuilder};

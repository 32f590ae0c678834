//! Native encoders for the Sfumato image asset pipeline.
//!
//! [`NativeCodec`] implements [`Codec`](sfumato_interface::Codec):
//!
//! - JPEG sources are decoded with `image` and re-compressed with mozjpeg
//!   (progressive, optimized Huffman coding).
//! - PNG sources are losslessly recompressed with oxipng.
//!
//! ```no_run
//! use sfumato_codec::NativeCodec;
//! use sfumato_core::ImageFormat;
//! use sfumato_interface::Codec;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("photo.png")?;
//! let encoded = NativeCodec::default().encode(&bytes, &ImageFormat::Png.profile())?;
//! println!("{} -> {} bytes", bytes.len(), encoded.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod jpeg;
mod native;
mod png;

pub use native::{NativeCodec, NativeCodecBuilder};

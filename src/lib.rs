//! # bmpfilter
//!
//! Uncompressed BMP decoder/encoder and four image filters: invert,
//! grayscale, median and gamma correction.
//!
//! ## Supported Formats
//!
//! - **1, 2, 8 bpp** with a 256-entry palette. Each stored byte is one pixel
//!   and is used directly as a gray level; the palette is kept but never
//!   looked up. Writing keeps only the red channel.
//! - **24 bpp** BGR, read from the header's pixel-data offset.
//!
//! Compressed images (RLE, bitfields) and other bit depths are rejected with
//! [`BitmapError::UnsupportedFormat`].
//!
//! ## Usage
//!
//! ```no_run
//! use bmpfilter::{Filter, Unstoppable, read_bmp, write_bmp};
//!
//! let mut bitmap = read_bmp("in.bmp")?;
//! Filter::Median { window: 3 }.apply(&mut bitmap, Unstoppable)?;
//! write_bmp("out.bmp", &bitmap)?;
//! # Ok::<(), bmpfilter::BitmapError>(())
//! ```
//!
//! Long-running operations take an [`enough::Stop`] token and return
//! [`BitmapError::Cancelled`] once it fires. Pass [`Unstoppable`] when
//! cancellation is not needed.

#![forbid(unsafe_code)]

mod bitmap;
mod decode;
mod encode;
mod error;
mod io;
mod limits;
mod pixel;

pub mod bmp;
pub mod filter;

// Re-exports
pub use bitmap::Bitmap;
pub use bmp::{BmpHeader, Palette, PixelDepth};
pub use decode::{DecodeRequest, decode_bmp};
pub use encode::encode_bmp;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use filter::{Filter, gamma, grayscale, invert, median};
pub use imgref::{ImgRef, ImgRefMut};
pub use io::{read_bmp, write_bmp};
pub use limits::Limits;
pub use pixel::Pixel;

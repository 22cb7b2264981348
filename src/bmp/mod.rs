//! Uncompressed BMP decoder and encoder.
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`],
//! [`crate::read_bmp`] and [`crate::write_bmp`].

mod decode;
mod encode;
mod header;
mod utils;

pub use header::{BmpHeader, HEADER_LEN, PALETTE_LEN, Palette, PixelDepth};

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;
use enough::Stop;

/// Decode BMP data into a [`Bitmap`].
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    decode::decode_bitmap(data, limits, stop)
}

/// Encode a [`Bitmap`] to BMP bytes.
pub(crate) fn encode(bitmap: &Bitmap, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bitmap(bitmap, stop)
}

//! BMP encoder: writes a [`Bitmap`] back in the layout it was read with.

use enough::Stop;

use super::header::{HEADER_LEN, PALETTE_LEN};
use super::utils::indexed_row_padding;
use crate::bitmap::{Bitmap, Storage};
use crate::error::BitmapError;
use crate::pixel::{self, PIXEL_BYTES};

/// Encode `bitmap` to BMP bytes.
///
/// The header is written verbatim. Indexed images keep only the red channel
/// of each pixel.
pub(crate) fn encode_bitmap(bitmap: &Bitmap, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let w = bitmap.width();
    let h = bitmap.height();
    let too_large = || BitmapError::DimensionsTooLarge {
        width: w as u32,
        height: h as u32,
    };

    stop.check()?;

    match bitmap.storage() {
        Storage::Indexed { depth, palette } => {
            let padding = indexed_row_padding(w, depth.bits());
            let size = (w + padding)
                .checked_mul(h)
                .and_then(|n| n.checked_add(HEADER_LEN + PALETTE_LEN))
                .ok_or_else(too_large)?;

            let mut out = Vec::with_capacity(size);
            out.extend_from_slice(&bitmap.header().to_bytes());
            out.extend_from_slice(palette.as_bytes());
            for (n, row) in bitmap.rows().rev().enumerate() {
                if n % 16 == 0 {
                    stop.check()?;
                }
                out.extend(row.iter().map(|px| px.r));
                out.extend(core::iter::repeat_n(0u8, padding));
            }
            Ok(out)
        }
        Storage::Rgb24 { gap } => {
            let size = (w * PIXEL_BYTES)
                .checked_mul(h)
                .and_then(|n| n.checked_add(HEADER_LEN + gap.len()))
                .ok_or_else(too_large)?;

            let mut out = Vec::with_capacity(size);
            out.extend_from_slice(&bitmap.header().to_bytes());
            out.extend_from_slice(gap);
            for (n, row) in bitmap.rows().enumerate() {
                if n % 16 == 0 {
                    stop.check()?;
                }
                for &px in row {
                    out.extend_from_slice(&pixel::to_bgr_bytes(px));
                }
            }
            Ok(out)
        }
    }
}

//! BMP decoder for uncompressed 1, 2, 8 and 24-bit images.
//!
//! Indexed images (1/2/8 bpp) are read as one byte per pixel, bottom row
//! first, with that byte used directly as a gray level. 24-bit images are
//! read from `header.offset` top row first with no row padding.

use enough::Stop;
use imgref::ImgVec;

use super::header::{BmpHeader, HEADER_LEN, PALETTE_LEN, Palette, PixelDepth};
use super::utils::{Cursor, indexed_row_padding};
use crate::bitmap::{Bitmap, Storage};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{self, PIXEL_BYTES, Pixel};

/// Decode a complete BMP file held in memory.
pub(crate) fn decode_bitmap(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Bitmap, BitmapError> {
    let mut cursor = Cursor::new(data);
    let header = BmpHeader::read(&mut cursor)?;
    let depth = header.depth()?;
    let (width, height) = header.dimensions()?;
    check_limits(limits, width, height)?;

    log::debug!(
        "BMP {width}x{height}, {} bpp, pixel data at {}",
        depth.bits(),
        header.offset
    );

    let w = width as usize;
    let h = height as usize;
    let pixel_count = w
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    // Refuse before allocating if the file cannot hold the pixel data.
    let needed = encoded_len(&header, depth, w, h)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if data.len() < needed {
        return Err(BitmapError::UnexpectedEof);
    }

    stop.check()?;

    let (storage, buf) = if depth.has_palette() {
        decode_indexed(&mut cursor, depth, w, pixel_count, stop)?
    } else {
        decode_rgb24(&mut cursor, &header, w, pixel_count, stop)?
    };

    Ok(Bitmap::from_parts(header, storage, ImgVec::new(buf, w, h)))
}

fn check_limits(limits: Option<&Limits>, width: u32, height: u32) -> Result<(), BitmapError> {
    if let Some(limits) = limits {
        limits.check(width, height)?;
        let out_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(core::mem::size_of::<Pixel>()))
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        limits.check_memory(out_bytes)?;
    }
    Ok(())
}

/// Bytes a file with this header must contain, or `None` on overflow.
fn encoded_len(header: &BmpHeader, depth: PixelDepth, w: usize, h: usize) -> Option<usize> {
    if depth.has_palette() {
        let row = w.checked_add(indexed_row_padding(w, depth.bits()))?;
        row.checked_mul(h)?.checked_add(HEADER_LEN + PALETTE_LEN)
    } else {
        let offset = (header.offset as usize).max(HEADER_LEN);
        w.checked_mul(PIXEL_BYTES)?.checked_mul(h)?.checked_add(offset)
    }
}

fn decode_indexed(
    cursor: &mut Cursor<'_>,
    depth: PixelDepth,
    w: usize,
    pixel_count: usize,
    stop: &dyn Stop,
) -> Result<(Storage, Vec<Pixel>), BitmapError> {
    // Palette sits right after the fixed header; header.offset is not consulted.
    let palette = Palette::from_bytes(cursor.read_fixed_bytes::<PALETTE_LEN>()?);
    let padding = indexed_row_padding(w, depth.bits());

    let mut buf = vec![Pixel::default(); pixel_count];
    // Bottom row is stored first.
    for (n, row) in buf.chunks_exact_mut(w).rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        let bytes = cursor.take(w)?;
        for (px, &v) in row.iter_mut().zip(bytes) {
            *px = pixel::gray(v);
        }
        cursor.skip(padding)?;
    }

    Ok((Storage::Indexed { depth, palette }, buf))
}

fn decode_rgb24(
    cursor: &mut Cursor<'_>,
    header: &BmpHeader,
    w: usize,
    pixel_count: usize,
    stop: &dyn Stop,
) -> Result<(Storage, Vec<Pixel>), BitmapError> {
    let offset = header.offset as usize;
    if offset < HEADER_LEN {
        return Err(BitmapError::InvalidHeader(format!(
            "pixel data offset {offset} overlaps the {HEADER_LEN}-byte header"
        )));
    }
    debug_assert_eq!(cursor.position(), HEADER_LEN);
    let gap = cursor.take(offset - HEADER_LEN)?.to_vec();

    let row_bytes = w * PIXEL_BYTES;
    let mut buf = vec![Pixel::default(); pixel_count];
    // Rows run top to bottom, with no padding between them.
    for (n, row) in buf.chunks_exact_mut(w).enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        let bytes = cursor.take(row_bytes)?;
        for (px, bgr) in row.iter_mut().zip(bytes.chunks_exact(PIXEL_BYTES)) {
            *px = pixel::from_bgr_bytes([bgr[0], bgr[1], bgr[2]]);
        }
    }

    Ok((Storage::Rgb24 { gap }, buf))
}

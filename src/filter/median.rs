//! Windowed median filter with replicate-edge padding.

use enough::Stop;
use imgref::{ImgRef, ImgVec};

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::pixel::Pixel;

/// Largest padded grid the filter will build, in pixels.
pub(crate) const MAX_PADDED_PIXELS: usize = 1 << 28;

/// Odd window size actually used for a requested `window`.
///
/// Even sizes are bumped to the next odd size, so 4 behaves like 5.
pub(crate) fn effective_window(window: u32) -> Result<usize, BitmapError> {
    if window == 0 {
        return Err(BitmapError::InvalidParameter(
            "median window must be at least 1".into(),
        ));
    }
    let odd = if window % 2 == 0 {
        log::debug!("median window {window} is even, using {}", window + 1);
        window + 1
    } else {
        window
    };
    Ok(odd as usize)
}

pub(crate) fn median(bitmap: &mut Bitmap, window: u32, stop: &dyn Stop) -> Result<(), BitmapError> {
    let window = effective_window(window)?;
    let pad = window / 2;
    let padded = pad_replicate(bitmap.pixels(), pad)?;
    let padded_width = padded.width();
    let padded_buf = padded.buf();

    let area = window * window;
    let mid = area / 2;
    let mut reds = Vec::with_capacity(area);
    let mut greens = Vec::with_capacity(area);
    let mut blues = Vec::with_capacity(area);

    for (y, row) in bitmap.rows_mut().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, px) in row.iter_mut().enumerate() {
            reds.clear();
            greens.clear();
            blues.clear();
            // Pixel (x, y) sits at (x + pad, y + pad) in the padded grid, so its
            // window starts at (x, y) there.
            for wy in y..y + window {
                let start = wy * padded_width + x;
                for p in &padded_buf[start..start + window] {
                    reds.push(p.r);
                    greens.push(p.g);
                    blues.push(p.b);
                }
            }
            *px = Pixel {
                b: select_median(&mut blues, mid),
                g: select_median(&mut greens, mid),
                r: select_median(&mut reds, mid),
            };
        }
    }
    Ok(())
}

/// Element `mid` of `values` in ascending order.
fn select_median(values: &mut [u8], mid: usize) -> u8 {
    *values.select_nth_unstable(mid).1
}

/// Copy `src` into a grid grown by `pad` on every side, filling the border
/// from the nearest edge pixel.
///
/// Top and bottom border rows are copied from the first and last interior
/// rows first; the left and right border columns of every row (border rows
/// included) are then copied from the first and last interior columns, which
/// fills the corners from already-padded edge values.
fn pad_replicate(src: ImgRef<'_, Pixel>, pad: usize) -> Result<ImgVec<Pixel>, BitmapError> {
    let (w, h) = (src.width(), src.height());
    let (pw, ph) = padded_dims(w, h, pad)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(pw * ph)
        .map_err(|e| BitmapError::LimitExceeded(format!("median padded grid: {e}")))?;
    buf.resize(pw * ph, Pixel::default());

    for (y, row) in src.rows().enumerate() {
        let start = (y + pad) * pw + pad;
        buf[start..start + w].copy_from_slice(row);
    }

    let first = pad * pw;
    let last = (h + pad - 1) * pw;
    for i in 0..pad {
        buf.copy_within(first..first + pw, i * pw);
        buf.copy_within(last..last + pw, (ph - 1 - i) * pw);
    }

    for row in buf.chunks_exact_mut(pw) {
        let left = row[pad];
        let right = row[pad + w - 1];
        row[..pad].fill(left);
        row[pad + w..].fill(right);
    }

    Ok(ImgVec::new(buf, pw, ph))
}

/// Size of the padded grid, refused when it overflows or exceeds
/// [`MAX_PADDED_PIXELS`]. The window area never exceeds this size.
fn padded_dims(w: usize, h: usize, pad: usize) -> Result<(usize, usize), BitmapError> {
    let too_large = || {
        BitmapError::LimitExceeded(format!(
            "median window with padding {pad} on a {w}x{h} image exceeds {MAX_PADDED_PIXELS} pixels"
        ))
    };
    let border = pad.checked_mul(2).ok_or_else(too_large)?;
    let pw = w.checked_add(border).ok_or_else(too_large)?;
    let ph = h.checked_add(border).ok_or_else(too_large)?;
    match pw.checked_mul(ph) {
        Some(n) if n <= MAX_PADDED_PIXELS => Ok((pw, ph)),
        _ => Err(too_large()),
    }
}

//! Per-pixel filters: invert, grayscale and gamma correction.

use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::pixel::{self, Pixel};

/// Apply `f` to every pixel, checking `stop` every 16 rows.
fn map_pixels(
    bitmap: &mut Bitmap,
    stop: &dyn Stop,
    mut f: impl FnMut(Pixel) -> Pixel,
) -> Result<(), BitmapError> {
    for (y, row) in bitmap.rows_mut().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            *px = f(*px);
        }
    }
    Ok(())
}

pub(crate) fn invert(bitmap: &mut Bitmap, stop: &dyn Stop) -> Result<(), BitmapError> {
    map_pixels(bitmap, stop, |px| Pixel {
        b: 255 - px.b,
        g: 255 - px.g,
        r: 255 - px.r,
    })
}

pub(crate) fn grayscale(bitmap: &mut Bitmap, stop: &dyn Stop) -> Result<(), BitmapError> {
    map_pixels(bitmap, stop, |px| {
        let sum = u16::from(px.r) + u16::from(px.g) + u16::from(px.b);
        pixel::gray((sum / 3) as u8)
    })
}

pub(crate) fn gamma(bitmap: &mut Bitmap, gamma: f64, stop: &dyn Stop) -> Result<(), BitmapError> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(BitmapError::InvalidParameter(format!(
            "gamma must be a positive finite number, got {gamma}"
        )));
    }
    let lut = gamma_table(gamma);
    log::debug!("gamma correction with exponent {}", 1.0 / gamma);
    map_pixels(bitmap, stop, |px| Pixel {
        b: lut[usize::from(px.b)],
        g: lut[usize::from(px.g)],
        r: lut[usize::from(px.r)],
    })
}

/// `trunc(pow(c / 255, 1 / gamma) * 255)` for every channel value `c`.
fn gamma_table(gamma: f64) -> [u8; 256] {
    let exponent = 1.0 / gamma;
    core::array::from_fn(|c| (gamma_pow(c as f64 / 255.0, exponent) * 255.0) as u8)
}

/// `base.powf(exponent)` with exact results at exponents 0 and 1 and
/// negative exponents handled as reciprocals.
fn gamma_pow(base: f64, exponent: f64) -> f64 {
    if exponent == 0.0 {
        1.0
    } else if exponent == 1.0 {
        base
    } else if exponent < 0.0 {
        1.0 / gamma_pow(base, -exponent)
    } else {
        base.powf(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow_boundaries() {
        assert_eq!(gamma_pow(0.3, 0.0), 1.0);
        assert_eq!(gamma_pow(0.3, 1.0), 0.3);
        assert_eq!(gamma_pow(0.5, -1.0), 2.0);
        assert_eq!(gamma_pow(0.5, 2.0), 0.25);
        assert_eq!(gamma_pow(0.0, 0.5), 0.0);
    }

    #[test]
    fn table_endpoints_are_fixed() {
        for g in [0.25, 0.5, 1.0, 2.2, 4.0] {
            let lut = gamma_table(g);
            assert_eq!(lut[0], 0, "gamma {g}");
            assert_eq!(lut[255], 255, "gamma {g}");
        }
    }

    #[test]
    fn table_truncates() {
        // sqrt(64/255) * 255 = 127.75...
        let lut = gamma_table(2.0);
        assert_eq!(lut[64], 127);
        // (128/255)^2 * 255 = 64.25...
        let lut = gamma_table(0.5);
        assert_eq!(lut[128], 64);
    }

    #[test]
    fn gamma_brightens_above_one() {
        let lut = gamma_table(2.2);
        for c in 1..255 {
            assert!(lut[c] >= c as u8, "channel {c} darkened to {}", lut[c]);
        }
    }
}

//! Image filters. Each one rewrites the pixels of a [`Bitmap`] in place.

mod color;
mod median;

use core::fmt;

use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// One of the supported filters with its parameters.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    /// Every channel becomes `255 - channel`.
    Invert,
    /// Every channel becomes the floored average of the three channels.
    Grayscale,
    /// Per-channel median over a `window × window` neighborhood.
    /// Even windows are bumped to the next odd size.
    Median { window: u32 },
    /// Every channel becomes `trunc(255 * (c / 255)^(1 / gamma))`.
    Gamma { gamma: f64 },
}

impl Filter {
    /// Apply this filter to `bitmap`.
    ///
    /// Fails with `InvalidParameter` before touching any pixel if the
    /// parameters are out of range.
    pub fn apply(&self, bitmap: &mut Bitmap, stop: impl Stop) -> Result<(), BitmapError> {
        log::debug!(
            "applying {self} to {}x{} image",
            bitmap.width(),
            bitmap.height()
        );
        match *self {
            Filter::Invert => color::invert(bitmap, &stop),
            Filter::Grayscale => color::grayscale(bitmap, &stop),
            Filter::Median { window } => median::median(bitmap, window, &stop),
            Filter::Gamma { gamma } => color::gamma(bitmap, gamma, &stop),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Invert => f.write_str("invert"),
            Filter::Grayscale => f.write_str("grayscale"),
            Filter::Median { window } => write!(f, "median (window {window})"),
            Filter::Gamma { gamma } => write!(f, "gamma ({gamma})"),
        }
    }
}

/// Invert every channel.
pub fn invert(bitmap: &mut Bitmap, stop: impl Stop) -> Result<(), BitmapError> {
    Filter::Invert.apply(bitmap, stop)
}

/// Replace every pixel with the floored average of its channels.
pub fn grayscale(bitmap: &mut Bitmap, stop: impl Stop) -> Result<(), BitmapError> {
    Filter::Grayscale.apply(bitmap, stop)
}

/// Median filter over a square window.
///
/// `window` must be at least 1; an even `window` is treated as `window + 1`.
/// Borders are handled by replicating the nearest edge pixel, and each
/// channel is filtered on its own.
pub fn median(bitmap: &mut Bitmap, window: u32, stop: impl Stop) -> Result<(), BitmapError> {
    Filter::Median { window }.apply(bitmap, stop)
}

/// Gamma correction. `gamma` must be positive and finite.
pub fn gamma(bitmap: &mut Bitmap, gamma: f64, stop: impl Stop) -> Result<(), BitmapError> {
    Filter::Gamma { gamma }.apply(bitmap, stop)
}

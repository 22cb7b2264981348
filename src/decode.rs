use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;

/// Builder for decoding a BMP file held in memory.
///
/// ```no_run
/// use bmpfilter::{DecodeRequest, Limits, Unstoppable};
///
/// let data = std::fs::read("in.bmp")?;
/// let limits = Limits { max_pixels: Some(64 * 1024 * 1024), ..Default::default() };
/// let bitmap = DecodeRequest::new(&data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", bitmap.width(), bitmap.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating the pixel grid.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode. No partially decoded image is ever returned.
    pub fn decode(self, stop: impl Stop) -> Result<Bitmap, BitmapError> {
        crate::bmp::decode(self.data, self.limits, &stop)
    }
}

/// Decode BMP bytes with no limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

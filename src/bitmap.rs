use imgref::{ImgRef, ImgRefMut, ImgVec};

use crate::bmp::{BmpHeader, Palette, PixelDepth};
use crate::error::BitmapError;
use crate::pixel::Pixel;

/// Format-specific data kept alongside the pixels so the file can be
/// written back in its original layout.
#[derive(Clone, Debug)]
pub(crate) enum Storage {
    /// 1, 2 or 8 bpp: the palette that followed the header.
    Indexed { depth: PixelDepth, palette: Palette },
    /// 24 bpp: bytes between the end of the header and `header.offset`.
    Rgb24 { gap: Vec<u8> },
}

/// A decoded BMP image: header, optional palette, and a `width × height`
/// grid of pixels in one contiguous row-major buffer.
///
/// Row 0 is the top row. The grid always matches `header.width` and
/// `header.height`; filters mutate pixels in place and never resize.
#[derive(Clone, Debug)]
pub struct Bitmap {
    header: BmpHeader,
    storage: Storage,
    pixels: ImgVec<Pixel>,
}

impl Bitmap {
    pub(crate) fn from_parts(header: BmpHeader, storage: Storage, pixels: ImgVec<Pixel>) -> Self {
        debug_assert_eq!(pixels.width(), header.width as usize);
        debug_assert_eq!(pixels.height(), header.height as usize);
        debug_assert_eq!(pixels.stride(), pixels.width());
        Self {
            header,
            storage,
            pixels,
        }
    }

    /// Build a 24-bit bitmap from row-major pixels.
    ///
    /// The header is a plain uncompressed one with the pixel data at offset 54.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidParameter(format!(
                "bitmap dimensions must be positive, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if pixels.len() != expected {
            return Err(BitmapError::InvalidParameter(format!(
                "{width}x{height} bitmap needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        let header = BmpHeader::rgb24(width, height)?;
        Ok(Self::from_parts(
            header,
            Storage::Rgb24 { gap: Vec::new() },
            ImgVec::new(pixels, width as usize, height as usize),
        ))
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn depth(&self) -> PixelDepth {
        match &self.storage {
            Storage::Indexed { depth, .. } => *depth,
            Storage::Rgb24 { .. } => PixelDepth::Rgb24,
        }
    }

    /// Bits per pixel as stored in the header: 1, 2, 8 or 24.
    pub fn bits_per_pixel(&self) -> u16 {
        self.depth().bits()
    }

    /// The palette of an indexed image, `None` for 24-bit images.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.storage {
            Storage::Indexed { palette, .. } => Some(palette),
            Storage::Rgb24 { .. } => None,
        }
    }

    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Read-only view of the pixel grid.
    pub fn pixels(&self) -> ImgRef<'_, Pixel> {
        self.pixels.as_ref()
    }

    /// Mutable view of the pixel grid. Dimensions cannot change through it.
    pub fn pixels_mut(&mut self) -> ImgRefMut<'_, Pixel> {
        self.pixels.as_mut()
    }

    /// Pixel at column `x`, row `y` (row 0 is the top).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width() && y < self.height() {
            Some(self.pixels[(x, y)])
        } else {
            None
        }
    }

    /// Rows top to bottom. Never empty: dimensions are at least 1x1.
    pub(crate) fn rows(&self) -> core::slice::ChunksExact<'_, Pixel> {
        let width = self.width();
        self.pixels.buf().chunks_exact(width)
    }

    pub(crate) fn rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, Pixel> {
        let width = self.width();
        self.pixels.buf_mut().chunks_exact_mut(width)
    }
}

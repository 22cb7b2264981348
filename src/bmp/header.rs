//! On-disk BMP structures: the fixed 54-byte header and the 256-entry palette.

use core::fmt;

use super::utils::Cursor;
use crate::error::BitmapError;

/// Length of the fixed header (14-byte file header + 40-byte info header).
pub const HEADER_LEN: usize = 54;

/// Length of the palette stored after the header of indexed images.
pub const PALETTE_LEN: usize = 1024;

/// The 54-byte BMP header, one field per on-disk field.
///
/// All multi-byte fields are little-endian. Offsets:
///
/// | offset | size | field |
/// |-------:|-----:|-------|
/// | 0  | 2 | `signature` |
/// | 2  | 4 | `file_size` |
/// | 6  | 2 | `reserved1` |
/// | 8  | 2 | `reserved2` |
/// | 10 | 4 | `offset` |
/// | 14 | 4 | `dib_header_size` |
/// | 18 | 4 | `width` |
/// | 22 | 4 | `height` |
/// | 26 | 2 | `planes` |
/// | 28 | 2 | `bits_per_pixel` |
/// | 30 | 4 | `compression` |
/// | 34 | 4 | `image_size` |
/// | 38 | 4 | `x_pixels_per_meter` |
/// | 42 | 4 | `y_pixels_per_meter` |
/// | 46 | 4 | `colors_used` |
/// | 50 | 4 | `colors_important` |
///
/// Parsing does not normalize anything, so [`BmpHeader::to_bytes`] returns
/// exactly the bytes that were parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset of the pixel data (honored for 24-bit images only).
    pub offset: u32,
    pub dib_header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpHeader {
    /// Parse the header from the start of `data`.
    ///
    /// Only the byte layout is checked here; see [`BmpHeader::depth`] and
    /// [`BmpHeader::dimensions`] for semantic validation.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        Self::read(&mut Cursor::new(data))
    }

    pub(crate) fn read(c: &mut Cursor<'_>) -> Result<Self, BitmapError> {
        let signature = c.read_fixed_bytes::<2>()?;
        if &signature != b"BM" {
            return Err(BitmapError::UnrecognizedFormat);
        }
        Ok(Self {
            signature,
            file_size: c.get_u32_le_err()?,
            reserved1: c.get_u16_le_err()?,
            reserved2: c.get_u16_le_err()?,
            offset: c.get_u32_le_err()?,
            dib_header_size: c.get_u32_le_err()?,
            width: c.get_i32_le_err()?,
            height: c.get_i32_le_err()?,
            planes: c.get_u16_le_err()?,
            bits_per_pixel: c.get_u16_le_err()?,
            compression: c.get_u32_le_err()?,
            image_size: c.get_u32_le_err()?,
            x_pixels_per_meter: c.get_i32_le_err()?,
            y_pixels_per_meter: c.get_i32_le_err()?,
            colors_used: c.get_u32_le_err()?,
            colors_important: c.get_u32_le_err()?,
        })
    }

    /// Serialize back to the 54-byte on-disk layout.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let fields: [&[u8]; 16] = [
            &self.signature,
            &self.file_size.to_le_bytes(),
            &self.reserved1.to_le_bytes(),
            &self.reserved2.to_le_bytes(),
            &self.offset.to_le_bytes(),
            &self.dib_header_size.to_le_bytes(),
            &self.width.to_le_bytes(),
            &self.height.to_le_bytes(),
            &self.planes.to_le_bytes(),
            &self.bits_per_pixel.to_le_bytes(),
            &self.compression.to_le_bytes(),
            &self.image_size.to_le_bytes(),
            &self.x_pixels_per_meter.to_le_bytes(),
            &self.y_pixels_per_meter.to_le_bytes(),
            &self.colors_used.to_le_bytes(),
            &self.colors_important.to_le_bytes(),
        ];
        let mut pos = 0;
        for field in fields {
            out[pos..pos + field.len()].copy_from_slice(field);
            pos += field.len();
        }
        out
    }

    /// Header for a fresh uncompressed 24-bit image with pixel data at 54.
    pub(crate) fn rgb24(width: u32, height: u32) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = u32::try_from(
            u64::from(width) * u64::from(height) * crate::pixel::PIXEL_BYTES as u64,
        )
        .map_err(|_| too_large())?;
        let file_size = image_size
            .checked_add(HEADER_LEN as u32)
            .ok_or_else(too_large)?;

        Ok(Self {
            signature: *b"BM",
            file_size,
            reserved1: 0,
            reserved2: 0,
            offset: HEADER_LEN as u32,
            dib_header_size: 40,
            width: w,
            height: h,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size,
            // 72 DPI
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            colors_used: 0,
            colors_important: 0,
        })
    }

    /// Supported pixel depth, or `UnsupportedFormat`.
    ///
    /// Also rejects any nonzero compression flag.
    pub fn depth(&self) -> Result<PixelDepth, BitmapError> {
        let depth = PixelDepth::from_bits(self.bits_per_pixel).ok_or_else(|| {
            BitmapError::UnsupportedFormat(format!(
                "BMP bit depth {} unsupported (expected 1, 2, 8 or 24)",
                self.bits_per_pixel
            ))
        })?;
        if self.compression != 0 {
            return Err(BitmapError::UnsupportedFormat(format!(
                "BMP compression {} unsupported (only uncompressed images)",
                self.compression
            )));
        }
        Ok(depth)
    }

    /// Image width and height as positive values.
    ///
    /// Top-down bitmaps (negative height) and empty images are rejected.
    pub fn dimensions(&self) -> Result<(u32, u32), BitmapError> {
        if self.width <= 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP width must be positive, got {}",
                self.width
            )));
        }
        if self.height <= 0 {
            return Err(BitmapError::InvalidHeader(format!(
                "BMP height must be positive, got {}",
                self.height
            )));
        }
        Ok((self.width as u32, self.height as u32))
    }
}

/// Bit depths this codec reads and writes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelDepth {
    /// 1 bpp, palette present.
    Indexed1,
    /// 2 bpp, palette present.
    Indexed2,
    /// 8 bpp, palette present.
    Indexed8,
    /// 24 bpp BGR, no palette.
    Rgb24,
}

impl PixelDepth {
    pub fn from_bits(bpp: u16) -> Option<Self> {
        match bpp {
            1 => Some(Self::Indexed1),
            2 => Some(Self::Indexed2),
            8 => Some(Self::Indexed8),
            24 => Some(Self::Rgb24),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::Indexed1 => 1,
            Self::Indexed2 => 2,
            Self::Indexed8 => 8,
            Self::Rgb24 => 24,
        }
    }

    /// Whether a 1024-byte palette follows the header.
    pub fn has_palette(self) -> bool {
        !matches!(self, Self::Rgb24)
    }
}

/// The 256-entry color table of an indexed image.
///
/// Entries are `[blue, green, red, reserved]`. The table is carried through
/// decode and encode untouched; pixel values are never looked up in it.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette(Box<[u8; PALETTE_LEN]>);

impl Palette {
    pub fn from_bytes(bytes: [u8; PALETTE_LEN]) -> Self {
        Self(Box::new(bytes))
    }

    /// Linear grayscale ramp: entry `i` is `(i, i, i, 0)`.
    pub fn grayscale() -> Self {
        let mut bytes = [0u8; PALETTE_LEN];
        for (i, entry) in bytes.chunks_exact_mut(4).enumerate() {
            let v = i as u8;
            entry.copy_from_slice(&[v, v, v, 0]);
        }
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PALETTE_LEN] {
        &self.0
    }

    /// Entry `index` as `[blue, green, red, reserved]`.
    pub fn entry(&self, index: u8) -> [u8; 4] {
        let off = usize::from(index) * 4;
        [self.0[off], self.0[off + 1], self.0[off + 2], self.0[off + 3]]
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("entries", &(PALETTE_LEN / 4))
            .finish_non_exhaustive()
    }
}

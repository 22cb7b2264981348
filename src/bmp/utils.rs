//! Byte cursor and row arithmetic shared by the BMP decoder and encoder.

use crate::error::BitmapError;

/// Little-endian reader over an in-memory BMP file.
///
/// Every read is bounds-checked; running past the end is `UnexpectedEof`.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn set_position(&mut self, pos: usize) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof);
        }
        self.pos = pos;
        Ok(())
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        self.set_position(new_pos)
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let end = self.pos.checked_add(n).ok_or(BitmapError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    pub(crate) fn get_u16_le_err(&mut self) -> Result<u16, BitmapError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    pub(crate) fn get_u32_le_err(&mut self) -> Result<u32, BitmapError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    pub(crate) fn get_i32_le_err(&mut self) -> Result<i32, BitmapError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

/// Zero bytes appended to each indexed row: `(4 - (width * bpp / 8) % 4) % 4`.
///
/// Indexed rows are stored one byte per pixel regardless of `bpp`, but the
/// padding is still derived from the packed row length.
pub(crate) fn indexed_row_padding(width: usize, bpp: u16) -> usize {
    let packed = (width as u64 * u64::from(bpp)) / 8;
    ((4 - packed % 4) % 4) as usize
}

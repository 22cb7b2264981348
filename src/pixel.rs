/// One decoded pixel.
///
/// Fields are laid out blue, green, red, matching the byte order of a
/// 24-bit BMP pixel on disk.
pub type Pixel = rgb::Bgr<u8>;

/// Size of one [`Pixel`] in a 24-bit row.
pub(crate) const PIXEL_BYTES: usize = 3;

/// A pixel with the same value in every channel.
#[inline]
pub(crate) fn gray(v: u8) -> Pixel {
    Pixel { b: v, g: v, r: v }
}

/// Build a pixel from on-disk `[b, g, r]` bytes.
#[inline]
pub(crate) fn from_bgr_bytes(bytes: [u8; 3]) -> Pixel {
    let [b, g, r] = bytes;
    Pixel { b, g, r }
}

/// On-disk `[b, g, r]` bytes of a pixel.
#[inline]
pub(crate) fn to_bgr_bytes(px: Pixel) -> [u8; 3] {
    [px.b, px.g, px.r]
}

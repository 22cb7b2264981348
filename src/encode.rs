use enough::Stop;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Encode a [`Bitmap`] to BMP bytes in the layout it was decoded from.
///
/// 24-bit images decoded with [`crate::decode_bmp`] and encoded unchanged
/// reproduce the input exactly, as long as the input has no row padding and
/// no trailing bytes. Indexed images keep only the red channel.
pub fn encode_bmp(bitmap: &Bitmap, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    crate::bmp::encode(bitmap, &stop)
}

//! File-level read and write.

use std::io::Write;
use std::path::Path;

use enough::Unstoppable;

use crate::bitmap::Bitmap;
use crate::error::BitmapError;

/// Read and decode a BMP file.
pub fn read_bmp(path: impl AsRef<Path>) -> Result<Bitmap, BitmapError> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    crate::decode_bmp(&data, Unstoppable)
}

/// Encode `bitmap` and write it to `path`, replacing any existing file.
///
/// The bytes go to a temporary file in the same directory which is then
/// renamed over `path`, so a failed write never leaves a truncated image
/// behind.
pub fn write_bmp(path: impl AsRef<Path>, bitmap: &Bitmap) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let bytes = crate::encode_bmp(bitmap, Unstoppable)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

use enough::StopReason;

/// Errors from BMP decoding, encoding, filtering and file I/O.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}

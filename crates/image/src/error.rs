use {crate::PixelFormat, base::Vec2, std::fmt};

#[derive(Debug)]
pub enum ImageError {
    /// The buffer length does not match what the size and format require.
    CorruptFrame { expected: usize, got: usize },
    /// The size cannot be represented in the requested format.
    InvalidSize(Vec2<usize>),
    Format {
        expected: PixelFormat,
        got: PixelFormat,
    },
    Encode(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::CorruptFrame { expected, got } => {
                write!(f, "corrupt frame: expected {expected} bytes, got {got}")
            }
            ImageError::InvalidSize(size) => write!(f, "invalid image size: {size}"),
            ImageError::Format { expected, got } => {
                write!(f, "format error: expected {expected:?}, got {got:?}")
            }
            ImageError::Encode(msg) => write!(f, "encode error: {msg}"),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<crates_image::ImageError> for ImageError {
    fn from(err: crates_image::ImageError) -> Self {
        ImageError::Encode(err.to_string())
    }
}

use {crate::*, base::Vec2};

/// A frame of pixel data in a known format.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Check that the image has `expected` format and exactly the number of bytes that format needs.
    pub fn ensure(&self, expected: PixelFormat) -> Result<(), ImageError> {
        self.format.ensure_format(expected)?;
        match expected.frame_len(self.size) {
            Some(len) if self.data.len() != len => Err(ImageError::CorruptFrame {
                expected: len,
                got: self.data.len(),
            }),
            Some(_) => Ok(()),
            // compressed data has no fixed length
            None if expected == PixelFormat::Jpeg => Ok(()),
            None => Err(ImageError::InvalidSize(self.size)),
        }
    }
}

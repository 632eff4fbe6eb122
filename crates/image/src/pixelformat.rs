use {crate::*, base::Vec2};

// fourcc codes
pub(crate) const FOURCC_RGB3: u32 = u32::from_le_bytes(*b"RGB3");
pub(crate) const FOURCC_YUV3: u32 = u32::from_le_bytes(*b"YUV3");
pub(crate) const FOURCC_YU12: u32 = u32::from_le_bytes(*b"YU12");
pub(crate) const FOURCC_MJPG: u32 = u32::from_le_bytes(*b"MJPG");

/// Convert a fourcc code to a readable 4-character string.
pub fn fourcc_to_string(fourcc: u32) -> String {
    String::from_utf8_lossy(&fourcc.to_le_bytes()).into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Interleaved R, G, B, one byte each.
    Rgb8,
    /// Interleaved Y, U, V at full resolution, one byte each.
    Yuv444,
    /// Planar Y, then U, then V; chroma planes subsampled 2x in both axes.
    Yu12,
    Jpeg,
}

impl PixelFormat {
    pub fn from_fourcc(fourcc: u32) -> Option<Self> {
        match fourcc {
            FOURCC_RGB3 => Some(PixelFormat::Rgb8),
            FOURCC_YUV3 => Some(PixelFormat::Yuv444),
            FOURCC_YU12 => Some(PixelFormat::Yu12),
            FOURCC_MJPG => Some(PixelFormat::Jpeg),
            _ => None,
        }
    }

    pub fn as_fourcc(&self) -> u32 {
        match self {
            PixelFormat::Rgb8 => FOURCC_RGB3,
            PixelFormat::Yuv444 => FOURCC_YUV3,
            PixelFormat::Yu12 => FOURCC_YU12,
            PixelFormat::Jpeg => FOURCC_MJPG,
        }
    }

    /// Number of bytes one frame of `size` occupies, `None` for compressed
    /// formats and for sizes the format cannot represent.
    pub fn frame_len(&self, size: Vec2<usize>) -> Option<usize> {
        match self {
            PixelFormat::Rgb8 | PixelFormat::Yuv444 => Some(size.area() * 3),
            PixelFormat::Yu12 => {
                if size.x % 2 != 0 || size.y % 2 != 0 {
                    return None;
                }
                Some(size.area() + 2 * (size.x / 2) * (size.y / 2))
            }
            PixelFormat::Jpeg => None,
        }
    }

    pub fn ensure_format(&self, expected: PixelFormat) -> Result<(), ImageError> {
        if *self != expected {
            return Err(ImageError::Format {
                expected,
                got: *self,
            });
        }
        Ok(())
    }
}

// BT.601 YUV-to-RGB conversion for a single pixel (fixed-point, shift 8)
pub(crate) fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    let r = (y + ((359 * v) >> 8)).clamp(0, 255) as u8;
    let g = (y - ((88 * u + 183 * v) >> 8)).clamp(0, 255) as u8;
    let b = (y + ((454 * u) >> 8)).clamp(0, 255) as u8;
    (r, g, b)
}

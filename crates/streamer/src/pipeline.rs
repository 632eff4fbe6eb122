use {
    crate::StreamError,
    base::Vec2,
    bytes::Bytes,
    image::{Image, ImageError, PixelFormat},
    video::CameraHandle,
};

/// One JPEG-compressed camera frame.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    pub size: Vec2<usize>,
    pub jpeg: Bytes,
}

/// Reinterpret a raw capture as a YU12 frame of `size` and convert it to RGB.
///
/// The buffer must hold exactly one YU12 frame of `size`; any other length
/// is a corrupt frame.
pub fn decode_frame(size: Vec2<usize>, raw: Image) -> Result<Image, ImageError> {
    raw.format.ensure_format(PixelFormat::Yu12)?;
    image::yu12_to_rgb(&Image { size, ..raw })
}

/// Decode a raw capture and compress it to JPEG.
pub fn encode_frame(size: Vec2<usize>, raw: Image, quality: u8) -> Result<EncodedFrame, ImageError> {
    let rgb = decode_frame(size, raw)?;
    let jpeg = image::rgb_to_jpeg(&rgb, quality)?;
    Ok(EncodedFrame {
        size,
        jpeg: Bytes::from(jpeg),
    })
}

/// Capture one frame from an open handle and encode it.
pub fn encode_next_frame(
    handle: &mut CameraHandle,
    quality: u8,
) -> Result<EncodedFrame, StreamError> {
    let raw = handle.capture_raw()?;
    Ok(encode_frame(handle.size(), raw, quality)?)
}

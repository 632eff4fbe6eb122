use crate::*;

/// Convert an interleaved YUV image to RGB using BT.601 coefficients.
pub fn yuv444_to_rgb(image: &Image) -> Result<Image, ImageError> {
    image.ensure(PixelFormat::Yuv444)?;

    let mut rgb = Vec::with_capacity(image.data.len());
    for chunk in image.data.chunks_exact(3) {
        let (r, g, b) = yuv_to_rgb(chunk[0], chunk[1], chunk[2]);
        rgb.extend_from_slice(&[r, g, b]);
    }

    Ok(Image::new(image.size, rgb, PixelFormat::Rgb8))
}

/// Convert a YU12 frame straight to RGB.
pub fn yu12_to_rgb(image: &Image) -> Result<Image, ImageError> {
    yuv444_to_rgb(&yu12_to_yuv444(image)?)
}

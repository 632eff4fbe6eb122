use {crate::*, crates_image::ImageEncoder};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

pub fn rgb_to_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, ImageError> {
    image.ensure(PixelFormat::Rgb8)?;

    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.write_image(
        &image.data,
        image.size.x as u32,
        image.size.y as u32,
        crates_image::ExtendedColorType::Rgb8,
    )?;
    Ok(buffer)
}

use base::Vec2;
use image::{DEFAULT_JPEG_QUALITY, Image, ImageError, PixelFormat, rgb_to_jpeg, yu12_to_rgb};

#[test]
fn test_rgb_to_jpeg_soi_marker() {
    let size = Vec2::new(4, 4);
    let data: Vec<u8> = (0..48).collect(); // 4x4x3
    let image = Image::new(size, data, PixelFormat::Rgb8);

    let jpeg = rgb_to_jpeg(&image, 90).unwrap();

    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]); // JPEG SOI marker
}

#[test]
fn test_rgb_to_jpeg_quality_affects_size() {
    let size = Vec2::new(16, 16);
    let data: Vec<u8> = (0..768).map(|v| ((v * 37) % 256) as u8).collect();
    let image = Image::new(size, data, PixelFormat::Rgb8);

    let low_quality = rgb_to_jpeg(&image, 10).unwrap();
    let high_quality = rgb_to_jpeg(&image, 100).unwrap();

    assert!(low_quality.len() < high_quality.len());
}

#[test]
fn test_rgb_to_jpeg_rejects_yu12() {
    let image = Image::new(Vec2::new(2, 2), vec![128; 6], PixelFormat::Yu12);

    assert!(matches!(
        rgb_to_jpeg(&image, 90),
        Err(ImageError::Format { .. })
    ));
}

#[test]
fn test_yu12_frame_to_jpeg_full_frame() {
    let size = Vec2::new(1280, 720);
    let image = Image::new(size, vec![128; 1280 * 720 * 3 / 2], PixelFormat::Yu12);

    let jpeg = rgb_to_jpeg(&yu12_to_rgb(&image).unwrap(), DEFAULT_JPEG_QUALITY).unwrap();

    assert!(jpeg.len() > 2);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let decoded = crates_image::load_from_memory(&jpeg).unwrap();
    assert_eq!(decoded.width(), 1280);
    assert_eq!(decoded.height(), 720);
}

#[test]
fn test_yu12_frame_to_jpeg_gray_survives_compression() {
    let size = Vec2::new(16, 16);
    let image = Image::new(size, vec![128; 16 * 16 * 3 / 2], PixelFormat::Yu12);

    let jpeg = rgb_to_jpeg(&yu12_to_rgb(&image).unwrap(), DEFAULT_JPEG_QUALITY).unwrap();
    let decoded = crates_image::load_from_memory(&jpeg).unwrap().to_rgb8();

    for &v in decoded.as_raw() {
        assert!((126..=130).contains(&v));
    }
}

#[test]
fn test_yu12_frame_to_jpeg_rejects_corrupt_frame() {
    let size = Vec2::new(1280, 720);
    let image = Image::new(size, vec![128; 1000], PixelFormat::Yu12);

    assert!(matches!(
        yu12_to_rgb(&image),
        Err(ImageError::CorruptFrame { .. })
    ));
}

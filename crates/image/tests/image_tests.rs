use base::Vec2;
use image::{Image, ImageError, PixelFormat, fourcc_to_string};

#[test]
fn test_image_new_rgb8() {
    let size = Vec2::new(2, 3);
    let data: Vec<u8> = (0..18).collect(); // 2*3*3 = 18 bytes
    let image = Image::new(size, data.clone(), PixelFormat::Rgb8);

    assert_eq!(image.size, size);
    assert_eq!(image.data, data);
    assert!(matches!(image.format, PixelFormat::Rgb8));
    assert!(image.ensure(PixelFormat::Rgb8).is_ok());
}

#[test]
fn test_image_new_yu12() {
    let size = Vec2::new(4, 4);
    let data: Vec<u8> = vec![128; 24]; // 4*4 + 2*2 + 2*2 = 24 bytes
    let image = Image::new(size, data, PixelFormat::Yu12);

    assert!(image.ensure(PixelFormat::Yu12).is_ok());
}

#[test]
fn test_ensure_rejects_wrong_format() {
    let image = Image::new(Vec2::new(2, 2), vec![0; 12], PixelFormat::Rgb8);

    match image.ensure(PixelFormat::Yuv444) {
        Err(ImageError::Format { expected, got }) => {
            assert_eq!(expected, PixelFormat::Yuv444);
            assert_eq!(got, PixelFormat::Rgb8);
        }
        other => panic!("Expected ImageError::Format, got {:?}", other),
    }
}

#[test]
fn test_ensure_rejects_wrong_length() {
    let image = Image::new(Vec2::new(4, 4), vec![128; 23], PixelFormat::Yu12);

    match image.ensure(PixelFormat::Yu12) {
        Err(ImageError::CorruptFrame { expected, got }) => {
            assert_eq!(expected, 24);
            assert_eq!(got, 23);
        }
        other => panic!("Expected ImageError::CorruptFrame, got {:?}", other),
    }
}

#[test]
fn test_ensure_rejects_odd_yu12_size() {
    let image = Image::new(Vec2::new(3, 2), vec![128; 9], PixelFormat::Yu12);

    assert!(matches!(
        image.ensure(PixelFormat::Yu12),
        Err(ImageError::InvalidSize(_))
    ));
}

#[test]
fn test_ensure_accepts_any_jpeg_length() {
    let image = Image::new(Vec2::new(10, 10), vec![0xFF, 0xD8, 0xFF, 0xE0], PixelFormat::Jpeg);

    assert!(image.ensure(PixelFormat::Jpeg).is_ok());
}

#[test]
fn test_frame_len() {
    let size = Vec2::new(1280, 720);

    assert_eq!(PixelFormat::Yu12.frame_len(size), Some(1280 * 720 * 3 / 2));
    assert_eq!(PixelFormat::Rgb8.frame_len(size), Some(1280 * 720 * 3));
    assert_eq!(PixelFormat::Yuv444.frame_len(size), Some(1280 * 720 * 3));
    assert_eq!(PixelFormat::Jpeg.frame_len(size), None);
    assert_eq!(PixelFormat::Yu12.frame_len(Vec2::new(5, 4)), None);
}

#[test]
fn test_fourcc_roundtrip() {
    for format in [
        PixelFormat::Rgb8,
        PixelFormat::Yuv444,
        PixelFormat::Yu12,
        PixelFormat::Jpeg,
    ] {
        assert_eq!(PixelFormat::from_fourcc(format.as_fourcc()), Some(format));
    }
    assert_eq!(fourcc_to_string(PixelFormat::Yu12.as_fourcc()), "YU12");
    assert_eq!(PixelFormat::from_fourcc(u32::from_le_bytes(*b"NV12")), None);
}

#[test]
fn test_error_display() {
    let err = ImageError::CorruptFrame {
        expected: 24,
        got: 10,
    };
    let display = format!("{}", err);
    assert!(display.contains("corrupt frame"));
    assert!(display.contains("24"));
    assert!(display.contains("10"));

    let err = ImageError::InvalidSize(Vec2::new(3, 5));
    assert!(format!("{}", err).contains("3x5"));

    let err = ImageError::Encode("boom".to_string());
    assert!(format!("{}", err).contains("encode error"));
}

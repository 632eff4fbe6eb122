use base::Vec2;
use image::{Image, ImageError, PixelFormat};
use streamer::{StreamError, decode_frame, encode_frame, encode_next_frame};
use video::{CameraConfig, CameraHandle, VideoError};

fn gray_frame(size: Vec2<usize>) -> Image {
    Image::new(size, vec![128; size.area() * 3 / 2], PixelFormat::Yu12)
}

#[test]
fn test_encode_frame_produces_jpeg() {
    let size = Vec2::new(1280, 720);

    let frame = encode_frame(size, gray_frame(size), 95).unwrap();

    assert_eq!(frame.size, size);
    assert!(frame.jpeg.len() > 2);
    assert_eq!(&frame.jpeg[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_flat_gray_decodes_to_uniform_gray() {
    let size = Vec2::new(1280, 720);

    let rgb = decode_frame(size, gray_frame(size)).unwrap();

    assert_eq!(rgb.format, PixelFormat::Rgb8);
    assert_eq!(rgb.size, size);
    assert_eq!(rgb.data.len(), 1280 * 720 * 3);
    assert!(rgb.data.iter().all(|&b| b == 128));
}

#[test]
fn test_wrong_length_is_corrupt_frame() {
    let size = Vec2::new(1280, 720);

    for len in [0, 1280 * 720, 1280 * 720 * 3 / 2 - 1, 1280 * 720 * 3 / 2 + 1] {
        let raw = Image::new(size, vec![128; len], PixelFormat::Yu12);
        match encode_frame(size, raw, 95) {
            Err(ImageError::CorruptFrame { expected, got }) => {
                assert_eq!(expected, 1_382_400);
                assert_eq!(got, len);
            }
            other => panic!("expected a corrupt frame error, got {:?}", other),
        }
    }
}

#[test]
fn test_buffer_is_read_at_configured_size() {
    // the device's own size claim does not matter, only the byte count
    let raw = Image::new(Vec2::new(8, 4), vec![128; 48], PixelFormat::Yu12);

    let rgb = decode_frame(Vec2::new(4, 8), raw).unwrap();

    assert_eq!(rgb.size, Vec2::new(4, 8));
}

#[test]
fn test_odd_size_is_rejected() {
    let size = Vec2::new(5, 4);
    let raw = Image::new(size, vec![128; 30], PixelFormat::Yu12);

    assert!(matches!(
        decode_frame(size, raw),
        Err(ImageError::InvalidSize(_))
    ));
}

#[test]
fn test_non_yu12_input_is_rejected() {
    let size = Vec2::new(4, 4);
    let raw = Image::new(size, vec![0; 48], PixelFormat::Rgb8);

    assert!(matches!(
        decode_frame(size, raw),
        Err(ImageError::Format { .. })
    ));
}

#[test]
fn test_encode_next_frame_from_test_pattern() {
    let config = CameraConfig::default()
        .with_size(Vec2::new(64, 48))
        .with_frame_rate(200.0);
    let mut handle = CameraHandle::new(config).unwrap();
    handle.initialize().unwrap();

    let frame = encode_next_frame(&mut handle, 80).unwrap();

    assert_eq!(frame.size, Vec2::new(64, 48));
    assert_eq!(&frame.jpeg[..2], &[0xFF, 0xD8]);

    let decoded = crates_image::load_from_memory(&frame.jpeg).unwrap();
    assert_eq!(decoded.width(), 64);
    assert_eq!(decoded.height(), 48);
}

#[test]
fn test_encode_next_frame_on_closed_handle_is_device_error() {
    let mut handle = CameraHandle::new(CameraConfig::default()).unwrap();

    match encode_next_frame(&mut handle, 95) {
        Err(StreamError::Video(VideoError::Device(_))) => {}
        other => panic!("expected a device error, got {:?}", other.map(|f| f.size)),
    }
}

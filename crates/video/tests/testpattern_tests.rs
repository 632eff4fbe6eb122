use base::Vec2;
use image::PixelFormat;
use std::time::{Duration, Instant};
use video::{CameraConfig, CameraDevice, TestPattern, VideoError};

#[test]
fn test_capture_before_open_fails() {
    let mut device = TestPattern::new();

    assert!(device.blocking_capture().is_err());
}

#[test]
fn test_frames_have_yu12_layout() {
    let config = CameraConfig::default()
        .with_size(Vec2::new(16, 8))
        .with_frame_rate(1000.0);
    let mut device = TestPattern::new();
    let actual = device.open(&config).unwrap();
    assert_eq!(actual.size(), Vec2::new(16, 8));

    let frame = device.blocking_capture().unwrap();

    assert_eq!(frame.format, PixelFormat::Yu12);
    assert_eq!(frame.size, Vec2::new(16, 8));
    assert_eq!(frame.data.len(), 16 * 8 * 3 / 2);
    // chroma is neutral
    assert!(frame.data[16 * 8..].iter().all(|&v| v == 128));
}

#[test]
fn test_pattern_moves_between_frames() {
    let config = CameraConfig::default()
        .with_size(Vec2::new(16, 8))
        .with_frame_rate(1000.0);
    let mut device = TestPattern::new();
    device.open(&config).unwrap();

    let first = device.blocking_capture().unwrap();
    let second = device.blocking_capture().unwrap();

    assert_ne!(first.data, second.data);
}

#[test]
fn test_capture_is_paced_by_frame_rate() {
    let config = CameraConfig::default()
        .with_size(Vec2::new(4, 4))
        .with_frame_rate(50.0);
    let mut device = TestPattern::new();
    device.open(&config).unwrap();

    let start = Instant::now();
    for _ in 0..4 {
        device.blocking_capture().unwrap();
    }

    // first frame is immediate, the next three wait 20ms each
    assert!(start.elapsed() >= Duration::from_millis(55));
}

#[test]
fn test_open_rejects_odd_size() {
    let config = CameraConfig::default().with_size(Vec2::new(5, 4));
    let mut device = TestPattern::new();

    assert!(device.open(&config).is_err());
}

#[test]
fn test_close_stops_capture() {
    let config = CameraConfig::default()
        .with_size(Vec2::new(4, 4))
        .with_frame_rate(1000.0);
    let mut device = TestPattern::new();
    device.open(&config).unwrap();
    device.close();

    assert!(device.blocking_capture().is_err());
}

#[test]
fn test_tiny_frame_rate_is_rejected() {
    let mut device = TestPattern::new();

    for rate in [1e-40, 1e-20] {
        let config = CameraConfig::default()
            .with_size(Vec2::new(16, 8))
            .with_frame_rate(rate);
        assert!(matches!(device.open(&config), Err(VideoError::Device(_))));
    }
    assert!(device.blocking_capture().is_err());
}

use base::Vec2;
use streamer::{ServerConfig, config::DEFAULT_BIND};
use video::{Backend, CameraConfig};

#[test]
fn test_defaults() {
    let config = ServerConfig::default();

    assert_eq!(config.bind(), DEFAULT_BIND);
    assert_eq!(config.bind(), "0.0.0.0:8000");
    assert_eq!(config.jpeg_quality(), 95);
    assert_eq!(config.camera().size(), Vec2::new(1280, 720));
    assert_eq!(config.camera().backend(), &Backend::TestPattern);
}

#[test]
fn test_builders() {
    let camera = CameraConfig::default().with_size(Vec2::new(640, 480));
    let config = ServerConfig::default()
        .with_bind("127.0.0.1:9000")
        .with_jpeg_quality(70)
        .with_camera(camera.clone());

    assert_eq!(config.bind(), "127.0.0.1:9000");
    assert_eq!(config.jpeg_quality(), 70);
    assert_eq!(config.camera(), &camera);
}

#[test]
fn test_jpeg_quality_is_clamped() {
    assert_eq!(ServerConfig::default().with_jpeg_quality(0).jpeg_quality(), 1);
    assert_eq!(ServerConfig::default().with_jpeg_quality(255).jpeg_quality(), 100);
}

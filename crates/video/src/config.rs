use {base::Vec2, image::PixelFormat, std::path::PathBuf};

/// Which device implementation backs the camera.
#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    /// Synthetic frames, no hardware needed.
    TestPattern,
    /// A V4L2 capture node; `None` opens the first device.
    V4l2 { path: Option<PathBuf> },
    /// A libcamera sensor by index.
    RpiCam { index: usize },
}

/// Configuration for camera capture.
///
/// The pixel format is always YU12; only the backend, size and frame rate
/// can be chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    backend: Backend,
    size: Vec2<usize>,
    frame_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            backend: Backend::TestPattern,
            size: Vec2::new(1280, 720),
            frame_rate: 30.0,
        }
    }
}

impl CameraConfig {
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the capture size in pixels. Both dimensions must be even.
    pub fn with_size(mut self, size: Vec2<usize>) -> Self {
        self.size = size;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn format(&self) -> PixelFormat {
        PixelFormat::Yu12
    }

    /// Bytes in one raw frame, `None` if the size cannot be captured as YU12.
    pub fn frame_len(&self) -> Option<usize> {
        self.format().frame_len(self.size)
    }
}

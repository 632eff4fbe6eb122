use {image::DEFAULT_JPEG_QUALITY, video::CameraConfig};

/// Address the server listens on when nothing else is configured.
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// Configuration for the streaming server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    bind: String,
    jpeg_quality: u8,
    camera: CameraConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            camera: CameraConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set the listen address (e.g., "0.0.0.0:8000").
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Set the JPEG quality (1-100), clamped into range.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn bind(&self) -> &str {
        &self.bind
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }
}

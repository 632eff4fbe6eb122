use {
    crate::*,
    base::Vec2,
    image::{Image, PixelFormat},
};

/// Owns one camera device and its open/closed state.
///
/// `initialize` and `release` are idempotent. Capturing is only valid while
/// the handle is open.
pub struct CameraHandle {
    device: Box<dyn CameraDevice>,
    config: CameraConfig,
    open: bool,
}

impl CameraHandle {
    /// Create a closed handle for the backend named in `config`.
    pub fn new(config: CameraConfig) -> Result<Self, VideoError> {
        let device = create_device(config.backend())?;
        Ok(Self::with_device(device, config))
    }

    /// Create a closed handle around an existing device.
    pub fn with_device(device: Box<dyn CameraDevice>, config: CameraConfig) -> Self {
        Self {
            device,
            config,
            open: false,
        }
    }

    /// Open the device and start capturing. No-op if already open.
    ///
    /// The device must accept the configured size exactly; a device that
    /// negotiates anything else is closed again and reported as a device error.
    pub fn initialize(&mut self) -> Result<(), VideoError> {
        if self.open {
            return Ok(());
        }

        let actual = self.device.open(&self.config)?;
        if actual.size() != self.config.size() {
            self.device.close();
            return Err(VideoError::Device(format!(
                "requested {} but device delivers {}",
                self.config.size(),
                actual.size()
            )));
        }

        self.open = true;
        log::info!(
            "camera opened: {} {:?} at {:.1} fps",
            actual.size(),
            self.format(),
            actual.frame_rate()
        );
        Ok(())
    }

    /// Stop capturing and close the device. No-op if already closed.
    pub fn release(&mut self) {
        if !self.open {
            return;
        }
        self.device.close();
        self.open = false;
        log::info!("camera closed");
    }

    /// Block until the device delivers one raw YU12 frame.
    pub fn capture_raw(&mut self) -> Result<Image, VideoError> {
        if !self.open {
            return Err(VideoError::Device("camera is not open".to_string()));
        }
        self.device.blocking_capture()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn size(&self) -> Vec2<usize> {
        self.config.size()
    }

    pub fn format(&self) -> PixelFormat {
        self.config.format()
    }
}

impl Drop for CameraHandle {
    fn drop(&mut self) {
        self.release();
    }
}

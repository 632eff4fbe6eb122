use {crate::*, image::Image};

pub mod planes;
mod testpattern;
pub use testpattern::TestPattern;

#[cfg(feature = "rpicam")]
pub mod rpicam;

#[cfg(feature = "v4l2")]
pub mod v4l2;

/// A capture device delivering raw YU12 frames.
///
/// `blocking_capture` runs on the calling thread and may block until the
/// hardware produces a frame.
pub trait CameraDevice: Send {
    /// Open and configure the device and start capturing. Returns the config that was actually set.
    fn open(&mut self, config: &CameraConfig) -> Result<CameraConfig, VideoError>;

    /// Stop capturing and close the device, if open.
    fn close(&mut self);

    /// Capture one frame.
    fn blocking_capture(&mut self) -> Result<Image, VideoError>;
}

/// Build the device for a backend. Backends that were not compiled in fail with a device error.
pub fn create_device(backend: &Backend) -> Result<Box<dyn CameraDevice>, VideoError> {
    match backend {
        Backend::TestPattern => Ok(Box::new(TestPattern::new())),
        #[cfg(feature = "v4l2")]
        Backend::V4l2 { .. } => Ok(Box::new(v4l2::V4l2::new())),
        #[cfg(feature = "rpicam")]
        Backend::RpiCam { .. } => Ok(Box::new(rpicam::RpiCamera::new())),
        #[allow(unreachable_patterns)]
        other => Err(VideoError::Device(format!(
            "{:?} backend is not compiled in",
            other
        ))),
    }
}

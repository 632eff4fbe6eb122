//! Camera capture for the streamer.
//!
//! A [`CameraHandle`] owns one [`CameraDevice`] and its open/closed
//! lifecycle. Devices deliver raw YU12 frames at a fixed size; the
//! synthetic test pattern is always available, V4L2 and libcamera
//! backends sit behind the `v4l2` and `rpicam` features.

pub mod config;
pub mod device;
pub mod error;
pub mod handle;

pub use config::{Backend, CameraConfig};
pub use device::{CameraDevice, TestPattern, create_device};
pub use error::VideoError;
pub use handle::CameraHandle;

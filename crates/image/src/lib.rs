//! Pixel buffers and conversions for the camera streamer.
//!
//! Raw camera frames arrive as planar YU12 (I420). This crate splits them
//! into planes, upsamples chroma to full resolution, converts to RGB with
//! BT.601 coefficients and encodes the result as JPEG through the `image`
//! crate.

pub mod error;
pub mod image;
pub mod jpeg;
pub mod pixelformat;
pub mod rgb;
pub mod yu12;

pub use error::ImageError;
pub use image::Image;
pub use jpeg::*;
pub use pixelformat::*;
pub use rgb::*;
pub use yu12::*;

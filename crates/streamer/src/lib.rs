//! MJPEG streaming of a single camera over HTTP.
//!
//! A [`StreamController`] owns the camera and the on/off state. Every
//! `/video_feed` connection pulls its own [`FrameStream`] from the
//! controller, turning raw YU12 captures into JPEG parts of a
//! `multipart/x-mixed-replace` response until streaming stops.

pub mod config;
pub mod controller;
pub mod error;
pub mod multipart;
pub mod pipeline;
pub mod server;

pub use config::ServerConfig;
pub use controller::{FrameStream, StreamController, StreamState};
pub use error::StreamError;
pub use pipeline::{EncodedFrame, decode_frame, encode_frame, encode_next_frame};
pub use server::{Server, router};

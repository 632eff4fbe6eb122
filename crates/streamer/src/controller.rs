use {
    crate::*,
    base::Vec2,
    std::{
        iter::FusedIterator,
        sync::{
            Arc, Mutex, MutexGuard,
            atomic::{AtomicBool, Ordering},
        },
    },
    video::CameraHandle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Stopped,
    Streaming,
}

/// Process-wide streaming state and the camera it governs.
///
/// `start` and `stop` are serialized by the transition lock, the only place
/// the streaming flag is written. The camera lock is held for one capture at
/// a time; conversion and encoding run outside it. Frame loops check the flag
/// before every capture, so once `stop` clears it they stop competing for the
/// camera and the release goes through after at most one capture per loop.
pub struct StreamController {
    transition: Mutex<()>,
    camera: Mutex<CameraHandle>,
    streaming: AtomicBool,
    size: Vec2<usize>,
    jpeg_quality: u8,
}

impl StreamController {
    pub fn new(camera: CameraHandle, jpeg_quality: u8) -> Self {
        let size = camera.size();
        Self {
            transition: Mutex::new(()),
            camera: Mutex::new(camera),
            streaming: AtomicBool::new(false),
            size,
            jpeg_quality,
        }
    }

    /// Build the controller and its (closed) camera from a server config.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StreamError> {
        let camera = CameraHandle::new(config.camera().clone())?;
        Ok(Self::new(camera, config.jpeg_quality()))
    }

    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.transition.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_camera(&self) -> MutexGuard<'_, CameraHandle> {
        self.camera.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open the camera and start streaming. No-op while already streaming.
    ///
    /// If the camera cannot be opened the controller stays stopped.
    pub fn start(&self) -> Result<(), StreamError> {
        let _transition = self.lock_transition();
        if self.streaming.load(Ordering::Acquire) {
            log::debug!("start: already streaming");
            return Ok(());
        }
        self.lock_camera().initialize()?;
        self.streaming.store(true, Ordering::Release);
        log::info!("stream started");
        Ok(())
    }

    /// Stop streaming and close the camera. No-op while stopped.
    ///
    /// Waits for captures already in progress.
    pub fn stop(&self) {
        let _transition = self.lock_transition();
        if !self.streaming.load(Ordering::Acquire) {
            log::debug!("stop: already stopped");
            return;
        }
        self.streaming.store(false, Ordering::Release);
        self.lock_camera().release();
        log::info!("stream stopped");
    }

    pub fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::Acquire)
    }

    pub fn state(&self) -> StreamState {
        if self.is_streaming() {
            StreamState::Streaming
        } else {
            StreamState::Stopped
        }
    }

    /// Capture one frame under the lock, then decode and encode it.
    ///
    /// Fails with a device error if the camera was released before the capture.
    pub fn encode_next_frame(&self) -> Result<EncodedFrame, StreamError> {
        let raw = self.lock_camera().capture_raw()?;
        Ok(encode_frame(self.size, raw, self.jpeg_quality)?)
    }

    /// A lazy sequence of frames that lasts until streaming stops or a frame fails.
    pub fn frames(self: &Arc<Self>) -> FrameStream {
        FrameStream {
            controller: Arc::clone(self),
            count: 0,
            error: None,
            done: false,
        }
    }
}

/// Frames for one viewer, pulled one at a time.
///
/// The streaming flag is checked before every capture. The sequence ends
/// for good on the first stop or error; the error, if any, stays available
/// through [`FrameStream::error`].
pub struct FrameStream {
    controller: Arc<StreamController>,
    count: u64,
    error: Option<StreamError>,
    done: bool,
}

impl FrameStream {
    /// Number of frames produced so far.
    pub fn produced(&self) -> u64 {
        self.count
    }

    /// The error that ended the sequence, if it ended with one.
    pub fn error(&self) -> Option<&StreamError> {
        self.error.as_ref()
    }
}

impl Iterator for FrameStream {
    type Item = EncodedFrame;

    fn next(&mut self) -> Option<EncodedFrame> {
        if self.done {
            return None;
        }
        if !self.controller.is_streaming() {
            log::debug!("frame stream finished after {} frames", self.count);
            self.done = true;
            return None;
        }

        match self.controller.encode_next_frame() {
            Ok(frame) => {
                self.count += 1;
                Some(frame)
            }
            Err(error) => {
                // a capture racing stop() loses its device; that is a normal end
                if error.is_device_error() && !self.controller.is_streaming() {
                    log::debug!("frame stream stopped mid-capture: {}", error);
                } else {
                    log::error!("frame stream ended after {} frames: {}", self.count, error);
                }
                self.error = Some(error);
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for FrameStream {}

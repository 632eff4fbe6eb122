use {
    crate::{
        device::planes::{self, PlaneSpan},
        *,
    },
    base::Vec2,
    image::{Image, PixelFormat as ImagePixelFormat, fourcc_to_string},
    shiguredo_libcamera::{
        Camera, CameraManager, ConfigStatus, FrameBuffer, FrameBufferAllocator, FrameStatus,
        PixelFormat, Request, Size, Stream, StreamRole,
    },
    std::{
        sync::{Arc, mpsc},
        time::Duration,
    },
};

// how long a capture waits for the sensor before reporting a stream error
const CAPTURE_TIMEOUT: Duration = Duration::from_secs(1);

fn device_error(err: impl std::fmt::Display) -> VideoError {
    VideoError::Device(err.to_string())
}

/// Memory-mapped DMA-buf holding every plane of one frame buffer.
struct MmapBuffer {
    base: *mut libc::c_void,
    base_len: usize,
    planes: Vec<PlaneSpan>,
}

unsafe impl Send for MmapBuffer {}
unsafe impl Sync for MmapBuffer {}

impl MmapBuffer {
    fn mapping(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.base as *const u8, self.base_len) }
    }
}

impl Drop for MmapBuffer {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.base, self.base_len);
        }
    }
}

struct PendingFrame {
    cookie: usize,
    image: Image,
}

pub(crate) struct RpiCamera {
    manager: Option<CameraManager>,
    camera: Option<Camera>,
    allocator: Option<FrameBufferAllocator>,
    buffers: Vec<FrameBuffer>,
    requests: Vec<Request>,
    mmaps: Arc<Vec<MmapBuffer>>,
    stream: Option<Stream>,
    frame_rx: Option<mpsc::Receiver<PendingFrame>>,
}

impl RpiCamera {
    pub fn new() -> Self {
        Self {
            manager: None,
            camera: None,
            allocator: None,
            buffers: Vec::new(),
            requests: Vec::new(),
            mmaps: Arc::new(Vec::new()),
            stream: None,
            frame_rx: None,
        }
    }
}

impl CameraDevice for RpiCamera {
    fn open(&mut self, config: &CameraConfig) -> Result<CameraConfig, VideoError> {
        self.close();

        let index = match config.backend() {
            Backend::RpiCam { index } => *index,
            _ => {
                return Err(VideoError::Device(
                    "RpiCamera::open requires Backend::RpiCam".to_string(),
                ));
            }
        };

        // Create camera manager and acquire camera
        let manager = CameraManager::new().map_err(device_error)?;
        if manager.cameras_count() == 0 {
            return Err(VideoError::Device("No cameras found".to_string()));
        }
        let mut camera = manager.get_camera(index).map_err(device_error)?;
        camera.acquire().map_err(device_error)?;

        let mut cam_config = camera
            .generate_configuration(&[StreamRole::VideoRecording])
            .map_err(device_error)?;

        // request YU12 at the configured size
        {
            let mut sc = cam_config.at(0).map_err(device_error)?;
            sc.set_pixel_format(PixelFormat::from_fourcc(ImagePixelFormat::Yu12.as_fourcc()));
            let size = config.size();
            sc.set_size(Size::new(size.x as u32, size.y as u32));
        }

        if let ConfigStatus::Invalid = cam_config.validate().map_err(device_error)? {
            return Err(VideoError::Device(
                "Invalid camera configuration".to_string(),
            ));
        }
        camera.configure(&mut cam_config).map_err(device_error)?;

        // Read back the actual (possibly adjusted) configuration
        let (actual_size, stream);
        {
            let sc = cam_config.at(0).map_err(device_error)?;
            let fourcc = sc.pixel_format().fourcc;
            if ImagePixelFormat::from_fourcc(fourcc) != Some(ImagePixelFormat::Yu12) {
                return Err(VideoError::Device(format!(
                    "sensor does not deliver YU12, got {}",
                    fourcc_to_string(fourcc)
                )));
            }
            let sz = sc.size();
            actual_size = Vec2::new(sz.width as usize, sz.height as usize);
            stream = sc
                .stream()
                .ok_or(VideoError::Device("No stream available".to_string()))?;
        }

        // Allocate buffers
        let allocator = FrameBufferAllocator::new(&camera);
        let buffer_count = allocator.allocate(&stream).map_err(device_error)?;

        // Get buffer handles and mmap each buffer once, covering all of its planes
        let mut buffers = Vec::with_capacity(buffer_count);
        let mut mmap_buffers = Vec::with_capacity(buffer_count);

        for i in 0..buffer_count {
            let buffer = allocator.get_buffer(&stream, i).map_err(device_error)?;
            let buffer_planes: Vec<_> = (0..).map_while(|p| buffer.plane(p)).collect();
            let Some(first) = buffer_planes.first() else {
                return Err(VideoError::Device(format!("Buffer {i} has no planes")));
            };
            let fd = first.fd;
            if buffer_planes.iter().any(|plane| plane.fd != fd) {
                return Err(VideoError::Device(format!(
                    "Buffer {i} spreads its planes over several dmabufs"
                )));
            }

            let spans: Vec<PlaneSpan> = buffer_planes
                .iter()
                .map(|plane| PlaneSpan::new(plane.offset as usize, plane.length as usize))
                .collect();
            // Y, U and V must be packed at the negotiated width
            planes::check_yu12_planes(&spans, actual_size)?;

            let mmap_len = planes::mapping_len(&spans);
            let ptr = unsafe {
                libc::mmap(
                    std::ptr::null_mut(),
                    mmap_len,
                    libc::PROT_READ,
                    libc::MAP_SHARED,
                    fd,
                    0,
                )
            };

            if ptr == libc::MAP_FAILED {
                return Err(VideoError::Device(format!(
                    "Failed to mmap buffer {i}: {}",
                    std::io::Error::last_os_error(),
                )));
            }

            mmap_buffers.push(MmapBuffer {
                base: ptr,
                base_len: mmap_len,
                planes: spans,
            });
            buffers.push(buffer);
        }

        let mmaps = Arc::new(mmap_buffers);

        // Create requests, each bound to one buffer
        let mut requests = Vec::with_capacity(buffer_count);
        for (i, buffer) in buffers.iter().enumerate() {
            let request = camera.create_request(i as u64).map_err(device_error)?;
            request.add_buffer(&stream, buffer).map_err(device_error)?;
            requests.push(request);
        }

        // Frame delivery: the callback copies the YU12 planes out of the mmap and sends them on
        let (frame_tx, frame_rx) = mpsc::channel::<PendingFrame>();
        let mmaps_cb = Arc::clone(&mmaps);
        let stream_cb = stream.clone();
        let expected = ImagePixelFormat::Yu12
            .frame_len(actual_size)
            .ok_or(VideoError::Device(format!(
                "cannot capture YU12 at {actual_size}"
            )))?;

        camera.on_request_completed(move |completed| {
            let Some(buffer) = completed.find_buffer(&stream_cb) else {
                return;
            };
            if buffer.metadata().status != FrameStatus::Success {
                return;
            }

            let cookie = completed.cookie() as usize;
            if cookie >= mmaps_cb.len() {
                return;
            }

            let mmap = &mmaps_cb[cookie];
            let data = match planes::gather_planes(mmap.mapping(), &mmap.planes, expected) {
                Ok(data) => data,
                Err(error) => {
                    log::warn!("rpicam: dropping frame: {}", error);
                    return;
                }
            };
            let image = Image::new(actual_size, data, ImagePixelFormat::Yu12);

            let _ = frame_tx.send(PendingFrame { cookie, image });
        });

        // Start capturing and queue all requests
        camera.start().map_err(device_error)?;
        for request in &requests {
            camera.queue_request(request).map_err(device_error)?;
        }

        log::info!("rpicam: camera {} capturing YU12 at {}", index, actual_size);

        self.manager = Some(manager);
        self.camera = Some(camera);
        self.allocator = Some(allocator);
        self.buffers = buffers;
        self.requests = requests;
        self.mmaps = mmaps;
        self.stream = Some(stream);
        self.frame_rx = Some(frame_rx);

        Ok(config.clone().with_size(actual_size))
    }

    fn close(&mut self) {
        // Stop camera and release it (disconnects callback, drops frame_tx + mmaps Arc clone)
        if let Some(camera) = self.camera.take() {
            let _ = camera.stop();
            let _ = camera.release();
        }

        self.frame_rx.take();
        self.requests.clear();
        self.mmaps = Arc::new(Vec::new());
        self.buffers.clear();
        self.stream.take();
        self.allocator.take();
        self.manager.take();
    }

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        let frame_rx = self
            .frame_rx
            .as_ref()
            .ok_or(VideoError::Stream("Camera not open".to_string()))?;

        let pending = match frame_rx.recv_timeout(CAPTURE_TIMEOUT) {
            Ok(pending) => pending,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                return Err(VideoError::Stream("Capture timeout".to_string()));
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err(VideoError::Stream("Frame channel closed".to_string()));
            }
        };

        // Reuse the completed request and re-queue it for the next capture
        if let (Some(camera), Some(stream)) = (self.camera.as_ref(), self.stream.as_ref()) {
            if pending.cookie < self.requests.len() {
                let request = &self.requests[pending.cookie];
                let buffer = &self.buffers[pending.cookie];
                request.reuse();
                request
                    .add_buffer(stream, buffer)
                    .map_err(|e| VideoError::Stream(format!("Failed to re-add buffer: {e}")))?;
                camera
                    .queue_request(request)
                    .map_err(|e| VideoError::Stream(format!("Failed to re-queue request: {e}")))?;
            }
        }

        Ok(pending.image)
    }
}

use {
    crate::{
        device::planes::{self, PlaneSpan},
        *,
    },
    base::Vec2,
    image::{Image, PixelFormat, fourcc_to_string},
    v4l::{
        Device, Format, FourCC, buffer::Type, io::mmap::Stream as MmapStream,
        io::traits::CaptureStream, video::Capture,
    },
};

// number of mmap buffers queued with the driver
const BUFFER_COUNT: u32 = 4;

pub(crate) struct V4l2 {
    stream: Option<MmapStream<'static>>,
    size: Vec2<usize>,
}

impl V4l2 {
    pub fn new() -> Self {
        Self {
            stream: None,
            size: Vec2::new(0, 0),
        }
    }
}

impl CameraDevice for V4l2 {
    fn open(&mut self, config: &CameraConfig) -> Result<CameraConfig, VideoError> {
        self.close();

        let path = match config.backend() {
            Backend::V4l2 { path } => path.clone(),
            _ => {
                return Err(VideoError::Device(
                    "V4l2::open should be called with Backend::V4l2".to_string(),
                ));
            }
        };

        // create device from path or default
        let device = match &path {
            Some(path) => Device::with_path(path)?,
            None => Device::new(0)?,
        };

        // request YU12 at the configured size and read back what the driver chose
        let size = config.size();
        let fourcc = PixelFormat::Yu12.as_fourcc().to_le_bytes();
        let actual_format = Capture::set_format(
            &device,
            &Format::new(size.x as u32, size.y as u32, FourCC::new(&fourcc)),
        )?;

        if actual_format.fourcc.repr != fourcc {
            return Err(VideoError::Device(format!(
                "device does not support YU12, got {}",
                fourcc_to_string(u32::from_le_bytes(actual_format.fourcc.repr))
            )));
        }
        let actual_size = Vec2::new(actual_format.width as usize, actual_format.height as usize);

        // rows padded to a wider stride would garble the frame
        planes::check_stride(actual_format.stride as usize, actual_size)?;
        planes::check_yu12_planes(&[PlaneSpan::new(0, actual_format.size as usize)], actual_size)?;

        // set the frame rate and get the actual frame rate back
        let actual_params = Capture::set_params(
            &device,
            &v4l::video::capture::Parameters::with_fps(config.frame_rate() as u32),
        )?;
        let actual_frame_rate =
            actual_params.interval.denominator as f32 / actual_params.interval.numerator as f32;

        self.stream = match MmapStream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT) {
            Ok(stream) => Some(stream),
            Err(error) => {
                return Err(VideoError::Stream(error.to_string()));
            }
        };
        self.size = actual_size;

        log::info!(
            "v4l2: opened {} at {} ({:.1} fps)",
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "device 0".to_string()),
            actual_size,
            actual_frame_rate
        );

        Ok(config
            .clone()
            .with_size(actual_size)
            .with_frame_rate(actual_frame_rate))
    }

    fn close(&mut self) {
        self.stream.take();
    }

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(VideoError::Stream("No stream".to_string()))?;

        match CaptureStream::next(stream) {
            Ok((frame_data, _metadata)) => {
                let expected = PixelFormat::Yu12
                    .frame_len(self.size)
                    .unwrap_or(frame_data.len());
                let data = planes::gather_planes(
                    frame_data,
                    &[PlaneSpan::new(0, frame_data.len())],
                    expected,
                )?;
                Ok(Image::new(self.size, data, PixelFormat::Yu12))
            }
            Err(error) => Err(VideoError::Stream(error.to_string())),
        }
    }
}

use {
    crate::*,
    base::Vec2,
    image::{Image, PixelFormat},
    std::{
        thread,
        time::{Duration, Instant},
    },
};

/// Synthetic camera producing a diagonal luma gradient that scrolls by a
/// few pixels every frame, over neutral chroma.
///
/// Frames are paced to the configured frame rate.
pub struct TestPattern {
    size: Vec2<usize>,
    interval: Duration,
    frame_index: u64,
    next_deadline: Option<Instant>,
}

impl TestPattern {
    pub fn new() -> Self {
        Self {
            size: Vec2::new(0, 0),
            interval: Duration::ZERO,
            frame_index: 0,
            next_deadline: None,
        }
    }

    fn render(&self) -> Vec<u8> {
        let Vec2 { x: width, y: height } = self.size;
        let shift = (self.frame_index * 4) as usize;
        let uv_len = (width / 2) * (height / 2);

        let mut data = Vec::with_capacity(width * height + 2 * uv_len);
        for row in 0..height {
            for col in 0..width {
                data.push(((row + col + shift) & 0xFF) as u8);
            }
        }
        data.resize(width * height + 2 * uv_len, 128);
        data
    }
}

impl Default for TestPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for TestPattern {
    fn open(&mut self, config: &CameraConfig) -> Result<CameraConfig, VideoError> {
        self.close();

        if config.frame_len().is_none() {
            return Err(VideoError::Device(format!(
                "cannot capture YU12 at {}",
                config.size()
            )));
        }

        let rate = config.frame_rate();
        let interval = if rate > 0.0 {
            Duration::try_from_secs_f32(1.0 / rate)
                .map_err(|_| VideoError::Device(format!("unsupported frame rate {rate}")))?
        } else {
            Duration::ZERO
        };

        self.size = config.size();
        self.interval = interval;
        self.frame_index = 0;
        self.next_deadline = Some(Instant::now());

        Ok(config.clone())
    }

    fn close(&mut self) {
        self.next_deadline = None;
    }

    fn blocking_capture(&mut self) -> Result<Image, VideoError> {
        let deadline = self
            .next_deadline
            .ok_or(VideoError::Stream("Test pattern not open".to_string()))?;

        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next_deadline = Some(deadline.max(now) + self.interval);

        let data = self.render();
        self.frame_index += 1;
        Ok(Image::new(self.size, data, PixelFormat::Yu12))
    }
}

use {image::ImageError, std::fmt, video::VideoError};

#[derive(Debug)]
pub enum StreamError {
    Video(VideoError),
    Image(ImageError),
    Io(std::io::Error),
}

impl StreamError {
    /// True for errors that come from the camera rather than the frame data.
    pub fn is_device_error(&self) -> bool {
        matches!(self, StreamError::Video(_))
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Video(err) => write!(f, "{err}"),
            StreamError::Image(err) => write!(f, "{err}"),
            StreamError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Video(err) => Some(err),
            StreamError::Image(err) => Some(err),
            StreamError::Io(err) => Some(err),
        }
    }
}

impl From<VideoError> for StreamError {
    fn from(err: VideoError) -> Self {
        StreamError::Video(err)
    }
}

impl From<ImageError> for StreamError {
    fn from(err: ImageError) -> Self {
        StreamError::Image(err)
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        StreamError::Io(err)
    }
}

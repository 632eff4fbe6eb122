use {
    base::Vec2,
    clap::{Parser, ValueEnum},
    log::LevelFilter,
    std::{path::PathBuf, sync::Arc},
    streamer::{Server, ServerConfig, StreamController, config::DEFAULT_BIND},
    video::{Backend, CameraConfig},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    /// Synthetic moving gradient, no camera needed
    Test,
    /// V4L2 capture device (build with --features v4l2)
    V4l2,
    /// Raspberry Pi camera through libcamera (build with --features rpicam)
    Rpicam,
}

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Stream a camera as MJPEG over HTTP")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: String,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value = "95")]
    quality: u8,

    /// Camera backend
    #[arg(short, long, value_enum, default_value = "test")]
    backend: BackendArg,

    /// V4L2 device path (default: first device)
    #[arg(long)]
    device: Option<PathBuf>,

    /// libcamera camera index
    #[arg(long, default_value = "0")]
    camera_index: usize,

    /// Capture width in pixels
    #[arg(long, default_value = "1280")]
    width: usize,

    /// Capture height in pixels
    #[arg(long, default_value = "720")]
    height: usize,

    /// Capture frame rate
    #[arg(long, default_value = "30")]
    fps: f32,

    /// Write logs to daily files in this directory instead of stdout
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        let backend = match self.backend {
            BackendArg::Test => Backend::TestPattern,
            BackendArg::V4l2 => Backend::V4l2 {
                path: self.device.clone(),
            },
            BackendArg::Rpicam => Backend::RpiCam {
                index: self.camera_index,
            },
        };
        let camera = CameraConfig::default()
            .with_backend(backend)
            .with_size(Vec2::new(self.width, self.height))
            .with_frame_rate(self.fps);
        ServerConfig::default()
            .with_bind(self.bind.clone())
            .with_jpeg_quality(self.quality)
            .with_camera(camera)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match &args.log_level {
        Some(level) => level
            .parse::<LevelFilter>()
            .map_err(|e| format!("invalid log level {level:?}: {e}"))?,
        None => base::default_level(),
    };
    match &args.log_dir {
        Some(dir) => base::init_file_logger(dir, level)?,
        None => base::init_stdout_logger(level),
    }

    let config = args.server_config();
    log::info!(
        "camera {:?} at {}, {:.1} fps, JPEG quality {}",
        config.camera().backend(),
        config.camera().size(),
        config.camera().frame_rate(),
        config.jpeg_quality()
    );

    let controller = Arc::new(StreamController::from_config(&config)?);
    let server = Server::bind(config.bind(), controller.clone()).await?;
    log::info!("open http://{} and press Start", server.local_addr());

    tokio::select! {
        result = server.wait() => result?,
        _ = tokio::signal::ctrl_c() => {
            log::info!("shutting down");
        }
    }

    // release the camera before exiting
    tokio::task::spawn_blocking(move || controller.stop()).await?;
    Ok(())
}

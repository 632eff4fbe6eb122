use {
    crate::*,
    axum::{
        Router,
        body::Body,
        extract::State,
        http::{StatusCode, header},
        response::{Html, IntoResponse, Response},
        routing::{get, post},
    },
    bytes::Bytes,
    std::{convert::Infallible, io, net::SocketAddr, sync::Arc},
    tokio::{
        net::{TcpListener, ToSocketAddrs},
        sync::mpsc,
        task::JoinHandle,
    },
};

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Routes of the streaming server, sharing one controller.
pub fn router(controller: Arc<StreamController>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/video_feed", get(video_feed))
        .route("/start", post(start))
        .route("/stop", post(stop))
        .with_state(controller)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn video_feed(State(controller): State<Arc<StreamController>>) -> Response {
    // capacity 1: the producer waits for the client before capturing again
    let (tx, rx) = mpsc::channel::<Bytes>(1);
    let mut frames = controller.frames();

    tokio::task::spawn_blocking(move || {
        log::info!("viewer connected");
        for frame in frames.by_ref() {
            if tx.blocking_send(multipart::encode_part(&frame.jpeg)).is_err() {
                log::info!("viewer disconnected after {} frames", frames.produced());
                return;
            }
        }
        log::info!("feed ended after {} frames", frames.produced());
    });

    let parts = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|part| (Ok::<_, Infallible>(part), rx))
    });

    (
        [
            (header::CONTENT_TYPE, multipart::CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(parts),
    )
        .into_response()
}

async fn start(State(controller): State<Arc<StreamController>>) -> (StatusCode, String) {
    let result = match tokio::task::spawn_blocking(move || controller.start()).await {
        Ok(result) => result,
        Err(e) => Err(StreamError::Io(io::Error::other(e))),
    };
    match result {
        Ok(()) => (StatusCode::OK, "Stream started".to_string()),
        Err(e) => {
            log::error!("failed to start stream: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to start stream: {e}"),
            )
        }
    }
}

async fn stop(State(controller): State<Arc<StreamController>>) -> (StatusCode, &'static str) {
    // stop() waits for an in-flight capture
    if let Err(e) = tokio::task::spawn_blocking(move || controller.stop()).await {
        log::error!("stop task failed: {}", e);
    }
    (StatusCode::OK, "Stream stopped")
}

/// A running HTTP server. Dropping it stops serving.
pub struct Server {
    local_addr: SocketAddr,
    serve_task: JoinHandle<io::Result<()>>,
}

impl Server {
    /// Bind a TCP listener and serve the router on a background task.
    pub async fn bind(
        addr: impl ToSocketAddrs,
        controller: Arc<StreamController>,
    ) -> Result<Self, StreamError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let app = router(controller);

        let serve_task = tokio::spawn(async move { axum::serve(listener, app).await });
        log::info!("serving on http://{}", local_addr);

        Ok(Self {
            local_addr,
            serve_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Wait until the server task ends.
    pub async fn wait(mut self) -> Result<(), StreamError> {
        match (&mut self.serve_task).await {
            Ok(result) => Ok(result?),
            Err(e) => Err(StreamError::Io(io::Error::other(e))),
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.serve_task.abort();
    }
}

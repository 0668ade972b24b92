//! Server lifecycle: bind, worker threads, shutdown.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info};

use crate::ServeOptions;
use crate::error::OfflineError;
use crate::files;

/// How often idle workers check for shutdown.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A running loopback server. Stops when shut down or dropped.
pub struct OfflineServer {
    addr: SocketAddr,
    root: PathBuf,
    http: Arc<tiny_http::Server>,
    stopping: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl OfflineServer {
    pub(crate) async fn start(root: PathBuf, options: ServeOptions) -> Result<Self, OfflineError> {
        let bind = SocketAddr::from((Ipv4Addr::LOCALHOST, options.port));
        // Binding touches the OS socket layer; keep it off the async workers.
        let http = tokio::task::spawn_blocking(move || tiny_http::Server::http(bind))
            .await
            .map_err(|e| OfflineError::Server(format!("spawn_blocking join: {e}")))?
            .map_err(|e| OfflineError::Server(format!("failed to bind {bind}: {e}")))?;
        let addr = http
            .server_addr()
            .to_ip()
            .ok_or_else(|| OfflineError::Server("server has no IP address".into()))?;

        let mut server = Self {
            addr,
            root,
            http: Arc::new(http),
            stopping: Arc::new(AtomicBool::new(false)),
            workers: Vec::with_capacity(options.workers.max(1)),
        };
        for index in 0..options.workers.max(1) {
            let http = Arc::clone(&server.http);
            let stopping = Arc::clone(&server.stopping);
            let root = server.root.clone();
            let handle = std::thread::Builder::new()
                .name(format!("mag-offline-{index}"))
                .spawn(move || serve_requests(&http, &root, &stopping))
                .map_err(|e| OfflineError::Server(format!("failed to spawn worker: {e}")))?;
            server.workers.push(handle);
        }
        Ok(server)
    }

    /// Base URL, e.g. `http://127.0.0.1:8080`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.addr.port()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL of a bundle directory under the server root, with a trailing slash
    /// so relative links inside the bundle resolve. `None` if `bundle` is not
    /// under the root.
    #[must_use]
    pub fn url_for(&self, bundle: &Path) -> Option<String> {
        let relative = bundle.strip_prefix(&self.root).ok()?;
        let mut url = self.url();
        url.push('/');
        for segment in relative.iter() {
            url.push_str(&urlencoding::encode(&segment.to_string_lossy()));
            url.push('/');
        }
        Some(url)
    }

    /// Stop accepting requests and wait for the workers to finish.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        self.stopping.store(true, Ordering::Release);
        for _ in &self.workers {
            self.http.unblock();
        }
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                debug!("offline worker panicked");
            }
        }
        info!(url = %self.url(), "offline server stopped");
    }
}

impl Drop for OfflineServer {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for OfflineServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfflineServer")
            .field("addr", &self.addr)
            .field("root", &self.root)
            .field("workers", &self.workers.len())
            .finish_non_exhaustive()
    }
}

fn serve_requests(http: &tiny_http::Server, root: &Path, stopping: &AtomicBool) {
    while !stopping.load(Ordering::Acquire) {
        match http.recv_timeout(POLL_INTERVAL) {
            Ok(Some(request)) => files::respond(root, request),
            Ok(None) => {}
            Err(error) => debug!(%error, "receive interrupted"),
        }
    }
}

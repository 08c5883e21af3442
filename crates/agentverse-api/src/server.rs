//! API server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::http::routes::create_router;
use crate::state::AppState;

/// HTTP server over a shared [`AppState`].
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        self.state.config.server.bind_address()
    }

    /// Serve until `shutdown` is cancelled, then drain in-flight requests.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_router(self.state.clone());

        let addr: SocketAddr = self.addr().parse()?;
        let listener = TcpListener::bind(addr).await?;

        info!("API server listening on {}", addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("API server stopped");
        Ok(())
    }
}

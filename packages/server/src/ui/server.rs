//! Server execution logic.

use std::{io, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{debug_room_state, get_messages, health_check, root_handler, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay
///
/// This struct wires the handlers to a running [`BroadcastEngine`](crate::usecase::BroadcastEngine)
/// and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let (engine, _task) = BroadcastEngine::new(config, pusher, generator, clock).spawn();
/// let server = Server::new(AppState::new(engine, 100));
/// server.run("127.0.0.1", 3000, 10).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router serving every HTTP and WebSocket endpoint.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント（`/` は通常の HTTP リクエストにも応答する）
            .route("/", get(root_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/messages", get(get_messages))
            .route("/api/health", get(health_check))
            .route("/debug/room", get(debug_room_state))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the relay until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The first port number tried (e.g., 3000)
    /// * `max_port_attempts` - How many consecutive ports to try when a port is in use
    ///
    /// # Errors
    ///
    /// Returns an error if no port could be bound or if there's an error during
    /// server execution.
    pub async fn run(
        self,
        host: &str,
        port: u16,
        max_port_attempts: u16,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let listener = bind_with_fallback(host, port, max_port_attempts).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("WebSocket chat relay listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Bind `host:port`, moving on to the next port while the current one is in use.
pub(crate) async fn bind_with_fallback(
    host: &str,
    port: u16,
    max_attempts: u16,
) -> io::Result<TcpListener> {
    let mut last_error = None;

    for offset in 0..max_attempts.max(1) {
        let Some(candidate) = port.checked_add(offset) else {
            break;
        };
        match TcpListener::bind((host, candidate)).await {
            Ok(listener) => return Ok(listener),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                tracing::warn!(
                    "Port {} is in use, trying {}",
                    candidate,
                    candidate.wrapping_add(1)
                );
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrInUse, format!("no free port from {}", port))
    }))
}

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use super::connection;
use super::dispatcher::Dispatcher;

/// Bind `addr` and serve connections until the process exits.
pub async fn serve(addr: &str, dispatcher: Arc<Dispatcher>) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("TCP server listening on {}", addr);

    serve_on(listener, dispatcher).await
}

/// Serve connections on an already-bound listener.
///
/// One tokio task per accepted connection; the accept loop returns to
/// accepting immediately, so no single connection's processing time can
/// stall new peers. A handler that fails or panics takes down only its own
/// task.
pub async fn serve_on(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    connection::handle(stream, peer, dispatcher).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

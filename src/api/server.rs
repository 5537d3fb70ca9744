//! HTTP server lifecycle: bind, spawn `axum::serve`, shut down on request.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::clinic_router;
use crate::state::ClinicState;

/// Handle to a running clinic server.
pub struct ClinicServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl ClinicServer {
    /// Signal graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Clinic server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn stopped(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Clinic server task failed: {e}");
            }
        }
    }
}

/// Bind `addr` (port 0 picks an ephemeral port) and serve the clinic router
/// in a background task.
pub async fn start_server_on(state: ClinicState, addr: SocketAddr) -> Result<ClinicServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind clinic server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = clinic_router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Clinic server received shutdown signal");
        };

        tracing::info!(%addr, "Clinic server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Clinic server error: {e}");
        }

        tracing::info!("Clinic server stopped");
    });

    Ok(ClinicServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

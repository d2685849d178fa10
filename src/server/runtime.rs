//! Server runtime - bind, serve, shut down on Ctrl+C.

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Serve `router` on `host:port` until Ctrl+C.
///
/// In-flight requests finish before this returns.
pub async fn serve(host: &str, port: u16, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

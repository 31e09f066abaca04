//! Cooperative shutdown signal.

use tokio::signal::unix::{SignalKind, signal};

/// Completes when SIGINT or SIGTERM is received.
///
/// Both loops `select!` on this future at their iteration boundaries so a
/// signal stops the loop without interrupting in-flight work.
pub async fn shutdown_signal() {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(term) => Some(term),
        Err(e) => {
            tracing::warn!(error = %e, "Graceful shutdown on SIGTERM unavailable");
            None
        }
    };

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    match terminate.as_mut() {
        Some(term) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = term.recv() => {}
            }
        }
        None => ctrl_c.await,
    }
}

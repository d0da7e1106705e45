//! Interrupt signal handling.

use tokio_util::sync::CancellationToken;

/// Wait for SIGINT and cancel the shared shutdown token.
///
/// Every server loop observes the token, so cancellation reaches the accept
/// loop, the broadcast timer, and all connection handlers.
pub async fn shutdown_on_ctrl_c(token: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Interrupt received, shutting down");
            token.cancel();
        }
        Err(e) => {
            tracing::error!("Failed to install interrupt handler: {}", e);
        }
    }
}

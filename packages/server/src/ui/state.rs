//! Server state and connection management.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::SessionRepository;

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
    /// Unix timestamp when connected (UTC, milliseconds)
    pub connected_at: i64,
}

/// Shared application state
pub struct AppState {
    /// Repository (data access abstraction)
    pub repository: Arc<dyn SessionRepository>,
    /// Shutdown token observed by every connection handler
    pub shutdown: CancellationToken,
}

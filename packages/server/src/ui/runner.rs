//! Server assembly and lifecycle.
//!
//! Builds the router, owns the accept loop and the broadcast timer, and
//! coordinates graceful shutdown through a shared cancellation token.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use chime_shared::time::current_time_rfc3339;

use crate::{
    domain::{Registry, SessionRepository},
    infrastructure::{dto::websocket::BroadcastFrame, repository::InMemorySessionRepository},
    ui::{
        handler::{get_sessions, health_check, websocket_handler},
        state::AppState,
    },
    usecase::BroadcastTimeUseCase,
};

/// Default interval between time broadcasts.
///
/// The drafts this server grew out of disagreed between ten seconds and a
/// minute, so the interval is configuration, not a constant baked into the
/// timer.
pub const DEFAULT_BROADCAST_INTERVAL: Duration = Duration::from_secs(10);

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Interval between time broadcasts
    pub broadcast_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5005,
            broadcast_interval: DEFAULT_BROADCAST_INTERVAL,
        }
    }
}

/// Errors that abort the server process
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding the listen address failed; fatal at startup
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    /// The accept loop failed
    #[error("Server I/O error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the server until the shutdown token is cancelled.
pub async fn run(config: ServerConfig, shutdown: CancellationToken) -> Result<(), ServerError> {
    let connected_clients = Arc::new(Mutex::new(HashMap::new()));
    let registry = Arc::new(Mutex::new(Registry::new()));
    let repository: Arc<dyn SessionRepository> =
        Arc::new(InMemorySessionRepository::new(connected_clients, registry));

    let state = Arc::new(AppState {
        repository: repository.clone(),
        shutdown: shutdown.clone(),
    });

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/sessions", get(get_sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Listening on {}", addr);

    // The broadcast timer runs independently of any single connection
    let broadcaster = tokio::spawn(broadcast_loop(
        repository,
        config.broadcast_interval,
        shutdown.clone(),
    ));

    let graceful = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { graceful.cancelled().await })
        .await?;

    // The accept loop is down; stop the timer and wait for it
    shutdown.cancel();
    let _ = broadcaster.await;

    tracing::info!("Server stopped");
    Ok(())
}

/// Enqueue the current time to every registered session once per `period`.
async fn broadcast_loop(
    repository: Arc<dyn SessionRepository>,
    period: Duration,
    cancel: CancellationToken,
) {
    let usecase = BroadcastTimeUseCase::new(repository);
    let mut ticker = tokio::time::interval(period);
    // Skip the immediate first tick
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = BroadcastFrame {
                    message: current_time_rfc3339(),
                };
                let payload = serde_json::to_string(&frame).unwrap();
                let delivered = usecase.execute(&payload).await;
                tracing::debug!("Broadcast enqueued for {} sessions", delivered);
            }
            () = cancel.cancelled() => {
                tracing::info!("Broadcast timer stopped");
                break;
            }
        }
    }
}

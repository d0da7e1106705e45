//! Client error definitions.

use thiserror::Error;

/// Errors that end a client run
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connect or transport failure on the WebSocket
    #[error("WebSocket transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),
}

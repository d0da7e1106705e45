//! WebSocket frame DTOs.
//!
//! The wire protocol is one JSON object per text frame. Field presence
//! decides the frame's meaning: a welcome carries `uid` + `secret`, a
//! broadcast carries `message`, a client reply carries `secret` + `uid`.

use serde::{Deserialize, Serialize};

/// First frame sent to every client after connect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeFrame {
    pub uid: String,
    pub secret: u16,
}

/// Periodic broadcast frame carrying the current time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastFrame {
    pub message: String,
}

/// Client reply echoing back its assigned secret.
///
/// The secret is widened to i64 because a client that never received a
/// welcome replies with its `-1` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretReply {
    pub secret: i64,
    pub uid: String,
}

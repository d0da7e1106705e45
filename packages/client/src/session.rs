//! Client session: connect once, echo the assigned secret when prompted.
//!
//! Frame handling is a pure function over the remembered state, so the
//! protocol behavior is testable without a socket.

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;

use chime_server::infrastructure::dto::websocket::SecretReply;

use crate::error::ClientError;

/// Lenient view of any server frame.
///
/// The wire protocol decides meaning by field presence, so every field is
/// optional here: a welcome carries `uid` + `secret`, a broadcast carries
/// `message`.
#[derive(Debug, Deserialize)]
struct InboundFrame {
    uid: Option<String>,
    secret: Option<i64>,
    message: Option<String>,
}

/// Connection lifecycle states.
///
/// `Active` self-loops on every received frame; the only transition to
/// `Closed` is a remote close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Active,
    Closed,
}

/// What the receive loop should do with an incoming frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameAction {
    /// Send this payload back to the server
    Reply(String),
    /// Nothing to send
    Ignore,
}

/// Remembered identity and secret.
///
/// Starts with the placeholders a client replies with if it is prompted
/// before its welcome arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoState {
    uid: String,
    secret: i64,
}

impl Default for EchoState {
    fn default() -> Self {
        Self {
            uid: "UNDEFINED".to_string(),
            secret: -1,
        }
    }
}

impl EchoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest one incoming text frame.
    ///
    /// Remembers `uid` and `secret` fields when present; a `message` field
    /// produces a reply carrying the most recently remembered values.
    /// Malformed frames are logged and ignored, never fatal.
    pub fn handle_frame(&mut self, text: &str) -> FrameAction {
        let frame: InboundFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(_) => {
                tracing::info!("Cannot parse frame! '{}'", text);
                return FrameAction::Ignore;
            }
        };

        if let Some(uid) = frame.uid {
            tracing::info!("Got a uid: {}", uid);
            self.uid = uid;
        }

        if let Some(secret) = frame.secret {
            tracing::info!("Got a secret: {}", secret);
            self.secret = secret;
        }

        if let Some(message) = frame.message {
            tracing::info!("Received message: {}", message);
            let reply = SecretReply {
                secret: self.secret,
                uid: self.uid.clone(),
            };
            return FrameAction::Reply(serde_json::to_string(&reply).unwrap());
        }

        FrameAction::Ignore
    }
}

/// Connect to the server and run the echo loop until the remote closes or
/// the token is cancelled.
///
/// # Returns
///
/// The state the connection ended in: `Closed` after a remote close,
/// `Active` when the loop was cancelled locally.
pub async fn run_client(
    url: &str,
    cancel: CancellationToken,
) -> Result<ConnectionState, ClientError> {
    tracing::info!("Connecting to {}", url);
    let (ws, _) = connect_async(url).await?;
    tracing::info!("Client connected");

    let (mut sink, mut stream) = ws.split();
    let mut echo = EchoState::new();
    let mut state = ConnectionState::Active;

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::info!("Client stopping");
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
            msg = stream.next() => {
                let Some(msg) = msg else {
                    tracing::info!("Server has disconnected");
                    state = ConnectionState::Closed;
                    break;
                };
                match msg {
                    Ok(Message::Text(text)) => {
                        if let FrameAction::Reply(payload) = echo.handle_frame(&text) {
                            sink.send(Message::text(payload)).await?;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server has disconnected");
                        state = ConnectionState::Closed;
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::info!("Server has disconnected: {}", e);
                        state = ConnectionState::Closed;
                        break;
                    }
                }
            }
        }
    }

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_frame_is_ignored() {
        // given (precondition):
        let mut state = EchoState::new();

        // when (operation):
        let action = state.handle_frame("definitely not json");

        // then (expected result): ignored, state untouched
        assert_eq!(action, FrameAction::Ignore);
        assert_eq!(state, EchoState::new());
    }

    #[test]
    fn test_malformed_frame_does_not_poison_later_frames() {
        // given (precondition): garbage arrived first
        let mut state = EchoState::new();
        let _ = state.handle_frame("{{{{");

        // when (operation): a normal welcome follows
        let action = state.handle_frame(r#"{"uid":"abc","secret":7}"#);

        // then (expected result): the welcome is processed as usual
        assert_eq!(action, FrameAction::Ignore);
        let reply = state.handle_frame(r#"{"message":"hi"}"#);
        assert_eq!(
            reply,
            FrameAction::Reply(r#"{"secret":7,"uid":"abc"}"#.to_string())
        );
    }

    #[test]
    fn test_welcome_is_remembered_without_reply() {
        // given (precondition):
        let mut state = EchoState::new();

        // when (operation):
        let action = state.handle_frame(r#"{"uid":"abc","secret":7}"#);

        // then (expected result): no reply to a welcome
        assert_eq!(action, FrameAction::Ignore);
    }

    #[test]
    fn test_message_triggers_exact_reply() {
        // given (precondition): the recorded welcome from the scenario
        let mut state = EchoState::new();
        let _ = state.handle_frame(r#"{"uid":"abc","secret":7}"#);

        // when (operation):
        let action = state.handle_frame(r#"{"message":"hi"}"#);

        // then (expected result): exactly {"secret":7,"uid":"abc"}
        assert_eq!(
            action,
            FrameAction::Reply(r#"{"secret":7,"uid":"abc"}"#.to_string())
        );
    }

    #[test]
    fn test_reply_uses_most_recent_values() {
        // given (precondition): a second welcome superseded the first
        let mut state = EchoState::new();
        let _ = state.handle_frame(r#"{"uid":"abc","secret":7}"#);
        let _ = state.handle_frame(r#"{"uid":"def","secret":9}"#);

        // when (operation):
        let action = state.handle_frame(r#"{"message":"hi"}"#);

        // then (expected result):
        assert_eq!(
            action,
            FrameAction::Reply(r#"{"secret":9,"uid":"def"}"#.to_string())
        );
    }

    #[test]
    fn test_message_before_welcome_replies_with_placeholders() {
        // given (precondition): no welcome yet
        let mut state = EchoState::new();

        // when (operation):
        let action = state.handle_frame(r#"{"message":"hi"}"#);

        // then (expected result):
        assert_eq!(
            action,
            FrameAction::Reply(r#"{"secret":-1,"uid":"UNDEFINED"}"#.to_string())
        );
    }

    #[test]
    fn test_frame_with_message_and_identity_records_then_replies() {
        // given (precondition):
        let mut state = EchoState::new();

        // when (operation): a single frame carries uid, secret and message
        let action =
            state.handle_frame(r#"{"uid":"abc","secret":7,"message":"hi"}"#);

        // then (expected result): the new values are already in the reply
        assert_eq!(
            action,
            FrameAction::Reply(r#"{"secret":7,"uid":"abc"}"#.to_string())
        );
    }

    #[test]
    fn test_unrelated_json_is_ignored() {
        // given (precondition):
        let mut state = EchoState::new();

        // when (operation):
        let action = state.handle_frame(r#"{"hello":"world"}"#);

        // then (expected result):
        assert_eq!(action, FrameAction::Ignore);
        assert_eq!(state, EchoState::new());
    }
}

//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::SessionId,
    infrastructure::dto::websocket::{SecretReply, WelcomeFrame},
    ui::state::AppState,
    usecase::{ConfirmSecretUseCase, DeregisterSessionUseCase, RegisterSessionUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this session's outbound traffic
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Register the session; identity and secret are generated exactly once,
    // here
    let register_usecase = RegisterSessionUseCase::new(state.repository.clone());
    let session = match register_usecase.execute(tx).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to register session: {}", e);
            return;
        }
    };
    let uid = session.uid.clone();

    // The welcome must be the first frame on the socket. The forwarder task
    // is not running yet, so a broadcast that lands on the channel in the
    // meantime is delivered after it.
    let welcome = WelcomeFrame {
        uid: uid.as_str().to_string(),
        secret: session.secret.value(),
    };
    let welcome_json = serde_json::to_string(&welcome).unwrap();
    if let Err(e) = sender.send(Message::Text(welcome_json.into())).await {
        tracing::error!("Failed to send welcome to '{}': {}", uid, e);
        remove_session(&state, &uid).await;
        return;
    }
    tracing::info!(
        "Registered session '{}' with secret {}",
        uid,
        session.secret
    );

    let state_clone = state.clone();
    let uid_clone = uid.clone();

    // Spawn a task to receive frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // Malformed payloads are logged and skipped; the
                    // connection stays open
                    let value = match serde_json::from_str::<serde_json::Value>(&text) {
                        Ok(value) => value,
                        Err(e) => {
                            tracing::warn!("Cannot parse frame from '{}': {}", uid_clone, e);
                            continue;
                        }
                    };
                    tracing::info!("Received frame from '{}': {}", uid_clone, value);

                    // A well-formed secret reply gets checked against the
                    // session's assigned value
                    if let Ok(reply) = serde_json::from_value::<SecretReply>(value) {
                        let confirm_usecase =
                            ConfirmSecretUseCase::new(state_clone.repository.clone());
                        match confirm_usecase.execute(&uid_clone, reply.secret).await {
                            Ok(true) => {
                                tracing::info!(
                                    "Session '{}' echoed its secret back",
                                    uid_clone
                                );
                            }
                            Ok(false) => {
                                tracing::warn!(
                                    "Session '{}' echoed a wrong secret: {}",
                                    uid_clone,
                                    reply.secret
                                );
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "Failed to confirm secret for '{}': {:?}",
                                    uid_clone,
                                    e
                                );
                            }
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", uid_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward queued messages (broadcasts) to this client.
    // On shutdown it closes the socket so no connection outlives the server.
    let shutdown = state.shutdown.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                msg = rx.recv() => {
                    match msg {
                        Some(msg) => {
                            if sender.send(Message::Text(msg.into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                () = shutdown.cancelled() => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // A failure on either side is terminal for this session only
    tracing::info!("Session '{}' disconnected", uid);
    remove_session(&state, &uid).await;
}

async fn remove_session(state: &Arc<AppState>, uid: &SessionId) {
    let deregister_usecase = DeregisterSessionUseCase::new(state.repository.clone());
    match deregister_usecase.execute(uid).await {
        Ok(()) => {
            tracing::info!("Session '{}' removed from registry", uid);
        }
        Err(e) => {
            tracing::warn!("Failed to deregister session '{}': {:?}", uid, e);
        }
    }
}

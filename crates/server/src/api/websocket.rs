//! WebSocket handler for the admin protocol.
//!
//! One endpoint, text frames of JSON. Each decoded request gets exactly one
//! reply on the same connection; frames that fail to decode get none.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use oracle_shared::{decode_client_message, encode, ClientMessage, ServerMessage};

use super::connections::ConnectionManager;
use crate::app::App;

/// Buffer size for per-connection message channels.
const CONNECTION_CHANNEL_BUFFER: usize = 64;

/// Shared state for WebSocket handlers.
pub struct WsState {
    pub app: Arc<App>,
    pub connections: Arc<ConnectionManager>,
}

/// WebSocket upgrade handler - entry point for WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<WsState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<WsState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let connection_id = state.app.random().gen_uuid();

    // Create a bounded channel for sending messages to this client
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    state
        .connections
        .register(connection_id, state.app.now(), tx)
        .await;

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    // Spawn a task to forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match encode(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to encode reply"),
            }
        }
    });

    // Handle incoming messages
    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match decode_client_message(text.as_str()) {
                Ok(msg) => {
                    let reply = handle_message(msg, &state, connection_id).await;
                    state.connections.send_to(connection_id, reply).await;
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Ignoring frame");
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::error!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    // Clean up
    state.connections.unregister(connection_id).await;
    send_task.abort();

    let remaining = state.connections.count().await;
    tracing::info!(
        connection_id = %connection_id,
        remaining = remaining,
        "WebSocket connection terminated"
    );
}

/// Dispatch a decoded request to the application.
async fn handle_message(msg: ClientMessage, state: &WsState, connection_id: Uuid) -> ServerMessage {
    tracing::debug!(connection_id = %connection_id, action = %msg.action(), "Request received");

    let username = match &msg {
        ClientMessage::LogIn { username, .. } => Some(username.clone()),
        _ => None,
    };

    let reply = state.app.handle(msg).await;

    if let (Some(username), ServerMessage::LogIn { status, .. }) = (username, &reply) {
        if status.is_success() {
            let previous = state
                .connections
                .get(connection_id)
                .await
                .and_then(|info| info.logged_in_as);
            if let Some(previous) = previous.filter(|previous| *previous != username) {
                tracing::info!(connection_id = %connection_id, %previous, %username, "Connection switched user");
            }
            state
                .connections
                .mark_logged_in(connection_id, &username)
                .await;
        }
    }
    reply
}

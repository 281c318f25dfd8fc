//! Session socket using tokio-tungstenite

use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use oracle_shared::{encode, ClientMessage};

use crate::infrastructure::messaging::{set_connection_state, ConnectionState};

/// The one WebSocket connection of a session.
///
/// Opened once; there is no reconnection. A failed handshake or a dropped
/// socket is logged and leaves the state at `Failed` / `Closed`.
pub struct SessionSocket {
    url: String,
    state: Arc<AtomicU8>,
}

impl SessionSocket {
    pub fn new(url: impl Into<String>, state: Arc<AtomicU8>) -> Self {
        Self {
            url: url.into(),
            state,
        }
    }

    /// Drive the socket until either side closes it.
    ///
    /// Text frames are forwarded verbatim on `inbound`; decoding is the
    /// session service's job. `inbound` is dropped when this returns, which is
    /// how the service learns the socket is gone.
    pub async fn run(
        self,
        mut outbound: mpsc::Receiver<ClientMessage>,
        inbound: mpsc::Sender<String>,
        mut disconnect: oneshot::Receiver<()>,
    ) {
        set_connection_state(&self.state, ConnectionState::Connecting);

        let ws_stream = match connect_async(&self.url).await {
            Ok((ws_stream, _)) => ws_stream,
            Err(e) => {
                tracing::error!(url = %self.url, error = %e, "Failed to connect to server");
                set_connection_state(&self.state, ConnectionState::Failed);
                return;
            }
        };

        tracing::info!("Connected to server at {}", self.url);
        set_connection_state(&self.state, ConnectionState::Connected);

        let (mut write, mut read) = ws_stream.split();

        let mut read_handle = tokio::spawn(async move {
            while let Some(msg) = read.next().await {
                match msg {
                    Ok(Message::Text(text)) => {
                        if inbound.send(text).await.is_err() {
                            tracing::debug!("Inbound frame receiver dropped");
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        tracing::info!("Server closed connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("WebSocket error: {}", e);
                        break;
                    }
                }
            }
        });

        let mut write_handle = tokio::spawn(async move {
            // A dropped handle resolves the oneshot with an error; that is not a
            // disconnect request, so stop polling it instead.
            let mut disconnect_armed = true;
            loop {
                tokio::select! {
                    next = outbound.recv() => {
                        let Some(msg) = next else { break };
                        let json = match encode(&msg) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::error!(action = %msg.action(), error = %e, "Failed to serialize request");
                                continue;
                            }
                        };
                        tracing::debug!(action = %msg.action(), "Sending request");
                        if let Err(e) = write.send(Message::Text(json)).await {
                            tracing::error!("Failed to send message: {}", e);
                            break;
                        }
                    }
                    requested = &mut disconnect, if disconnect_armed => {
                        if requested.is_ok() {
                            tracing::info!("Disconnect requested");
                            let _ = write.send(Message::Close(None)).await;
                            break;
                        }
                        disconnect_armed = false;
                    }
                }
            }
        });

        tokio::select! {
            _ = &mut read_handle => tracing::info!("Read task completed"),
            _ = &mut write_handle => tracing::info!("Write task completed"),
        }
        read_handle.abort();
        write_handle.abort();

        set_connection_state(&self.state, ConnectionState::Closed);
    }
}

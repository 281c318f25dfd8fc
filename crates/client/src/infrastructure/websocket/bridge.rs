//! WebSocket Bridge - wires the command bus and inbound frames to the socket.
//!
//! `create_connection` sets up:
//! - a CommandBus for queueing requests
//! - a receiver of raw inbound text frames
//! - a background task running the [`SessionSocket`]

use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use oracle_shared::ClientMessage;

use super::client::SessionSocket;
use crate::infrastructure::messaging::{
    CommandBus, ConnectionHandle, ConnectionState, ConnectionStateObserver,
};

/// Outbound queue depth; requests are user-driven so this is never close to full.
const OUTBOUND_BUFFER: usize = 32;

/// Inbound frame queue depth.
const INBOUND_BUFFER: usize = 64;

/// Result of creating a connection.
pub struct Connection {
    pub command_bus: CommandBus,
    pub inbound: mpsc::Receiver<String>,
    pub handle: ConnectionHandle,
    pub state_observer: ConnectionStateObserver,
}

/// Open the session socket in the background. Must be called inside a tokio runtime.
pub fn create_connection(url: &str) -> Connection {
    let (cmd_tx, cmd_rx) = mpsc::channel::<ClientMessage>(OUTBOUND_BUFFER);
    let (frame_tx, frame_rx) = mpsc::channel::<String>(INBOUND_BUFFER);
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();

    let state = Arc::new(AtomicU8::new(ConnectionState::Disconnected.to_u8()));

    let socket = SessionSocket::new(url, Arc::clone(&state));
    tokio::spawn(socket.run(cmd_rx, frame_tx, disconnect_rx));

    Connection {
        command_bus: CommandBus::new(cmd_tx),
        inbound: frame_rx,
        handle: ConnectionHandle::new(Arc::clone(&state), disconnect_tx),
        state_observer: ConnectionStateObserver::new(state),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::{SinkExt, StreamExt};
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::{accept_async, tungstenite::Message};

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);

    async fn wait_for_terminal(observer: &ConnectionStateObserver) -> ConnectionState {
        timeout(WAIT, async {
            loop {
                let state = observer.state();
                if state.is_terminal() {
                    return state;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("socket task should finish")
    }

    #[tokio::test]
    async fn request_and_reply_flow_over_real_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("handshake");

            let request = match ws.next().await {
                Some(Ok(Message::Text(text))) => text,
                other => panic!("expected text frame, got {other:?}"),
            };
            ws.send(Message::Text(
                r#"{"action":"log_in","status":"True"}"#.to_string(),
            ))
            .await
            .expect("reply");
            ws.close(None).await.expect("close");
            request
        });

        let mut connection = create_connection(&format!("ws://{addr}"));
        connection
            .command_bus
            .send(ClientMessage::LogIn {
                username: "a".to_string(),
                password: "b".to_string(),
            })
            .expect("queue login");

        let reply = timeout(WAIT, connection.inbound.recv())
            .await
            .expect("reply in time")
            .expect("reply frame");
        assert_eq!(reply, r#"{"action":"log_in","status":"True"}"#);

        let request = server.await.expect("server task");
        assert_eq!(request, r#"{"action":"log_in","username":"a","password":"b"}"#);

        assert_eq!(
            wait_for_terminal(&connection.state_observer).await,
            ConnectionState::Closed
        );
        let after_close = timeout(WAIT, connection.inbound.recv())
            .await
            .expect("channel settles");
        assert!(after_close.is_none());
    }

    #[tokio::test]
    async fn failed_handshake_is_swallowed() {
        // Grab a free port, then release it so nothing is listening there.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let mut connection = create_connection(&format!("ws://{addr}"));

        assert_eq!(
            wait_for_terminal(&connection.state_observer).await,
            ConnectionState::Failed
        );
        let frame = timeout(WAIT, connection.inbound.recv())
            .await
            .expect("channel settles");
        assert!(frame.is_none());
        assert!(!connection.handle.is_connected());
    }

    #[tokio::test]
    async fn disconnect_sends_close_frame() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut ws = accept_async(stream).await.expect("handshake");
            matches!(ws.next().await, Some(Ok(Message::Close(_))))
        });

        let connection = create_connection(&format!("ws://{addr}"));
        timeout(WAIT, async {
            while !connection.state_observer.is_connected() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("connected in time");

        let observer = connection.state_observer.clone();
        connection.handle.disconnect();

        assert!(server.await.expect("server task"));
        assert_eq!(wait_for_terminal(&observer).await, ConnectionState::Closed);
    }
}

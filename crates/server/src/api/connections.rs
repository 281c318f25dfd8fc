//! Connection management for WebSocket clients.
//!
//! Tracks connected clients and who they logged in as. Replies are always
//! sent to the requesting connection, never broadcast.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use oracle_shared::ServerMessage;

/// Information about a connected client.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: Uuid,
    pub connected_at: DateTime<Utc>,
    /// Username of the last accepted login on this connection
    pub logged_in_as: Option<String>,
}

/// Manages all active WebSocket connections.
pub struct ConnectionManager {
    /// Map of connection_id -> (ConnectionInfo, sender channel)
    connections: RwLock<HashMap<Uuid, (ConnectionInfo, mpsc::Sender<ServerMessage>)>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(
        &self,
        connection_id: Uuid,
        connected_at: DateTime<Utc>,
        sender: mpsc::Sender<ServerMessage>,
    ) {
        let info = ConnectionInfo {
            connection_id,
            connected_at,
            logged_in_as: None,
        };
        let mut connections = self.connections.write().await;
        connections.insert(connection_id, (info, sender));
        tracing::debug!(connection_id = %connection_id, total = connections.len(), "Connection registered");
    }

    pub async fn unregister(&self, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if let Some((info, _)) = connections.remove(&connection_id) {
            tracing::debug!(
                connection_id = %connection_id,
                logged_in_as = ?info.logged_in_as,
                "Connection unregistered"
            );
        }
    }

    pub async fn get(&self, connection_id: Uuid) -> Option<ConnectionInfo> {
        let connections = self.connections.read().await;
        connections.get(&connection_id).map(|(info, _)| info.clone())
    }

    pub async fn mark_logged_in(&self, connection_id: Uuid, username: &str) {
        let mut connections = self.connections.write().await;
        if let Some((info, _)) = connections.get_mut(&connection_id) {
            info.logged_in_as = Some(username.to_string());
        }
    }

    pub async fn count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Queue a message for one connection. Returns false if it is gone or its
    /// queue is full.
    pub async fn send_to(&self, connection_id: Uuid, message: ServerMessage) -> bool {
        let connections = self.connections.read().await;
        let Some((_, sender)) = connections.get(&connection_id) else {
            return false;
        };
        if let Err(e) = sender.try_send(message) {
            tracing::warn!(connection_id = %connection_id, error = %e, "Failed to queue reply");
            return false;
        }
        true
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

//! WebSocket transport for the session client
//!
//! - `client`: tokio-tungstenite socket task
//! - `bridge`: wires the command bus and inbound frame channel to that task

mod bridge;
mod client;

pub use bridge::{create_connection, Connection};
pub use client::SessionSocket;

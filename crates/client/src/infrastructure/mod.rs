//! Infrastructure adapters: transport and messaging.

pub mod messaging;
pub mod websocket;

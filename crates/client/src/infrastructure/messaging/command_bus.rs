//! Command Bus for sending requests to the server.
//!
//! Every request is fire-and-forget. Replies come back through the inbound
//! frame channel and are matched to their request by action alone, so at most
//! one request per action should be in flight: two concurrent `user_create`
//! submissions would produce two indistinguishable replies.

use oracle_shared::ClientMessage;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("outbound queue is full")]
    QueueFull,
    #[error("socket writer has stopped")]
    Closed,
}

/// Command bus feeding the socket writer task.
///
/// A concrete, cloneable struct rather than a trait; services own a clone.
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::Sender<ClientMessage>,
}

impl CommandBus {
    pub fn new(tx: mpsc::Sender<ClientMessage>) -> Self {
        Self { tx }
    }

    /// Queue a request for the socket writer.
    ///
    /// Returns immediately; a closed socket shows up as [`CommandError::Closed`].
    pub fn send(&self, message: ClientMessage) -> Result<(), CommandError> {
        self.tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => CommandError::QueueFull,
            TrySendError::Closed(_) => CommandError::Closed,
        })
    }
}

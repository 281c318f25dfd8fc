//! Boundary decoder/encoder for socket frames.
//!
//! Decoding is two-step: the frame must be a JSON object whose `"action"` is
//! one of the known [`Action`]s before the payload is decoded against the
//! schema. An unknown action is reported as such instead of being folded into
//! a generic parse failure.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::action::{Action, ACTION_KEY};
use crate::messages::{ClientMessage, ServerMessage};

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Frame has no string \"action\" field")]
    MissingAction,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid {action} payload: {source}")]
    InvalidPayload {
        action: Action,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decode a frame received by the client.
pub fn decode_server_message(text: &str) -> Result<ServerMessage, ProtocolError> {
    decode_tagged(text)
}

/// Decode a frame received by the server.
pub fn decode_client_message(text: &str) -> Result<ClientMessage, ProtocolError> {
    decode_tagged(text)
}

/// Serialize a message to JSON text.
pub fn encode<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    serde_json::to_string(message).map_err(ProtocolError::Encode)
}

fn decode_tagged<T: DeserializeOwned>(text: &str) -> Result<T, ProtocolError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;

    let action = match value.get(ACTION_KEY).and_then(|raw| raw.as_str()) {
        Some(raw) => raw
            .parse::<Action>()
            .map_err(|unknown| ProtocolError::UnknownAction(unknown.0))?,
        None => return Err(ProtocolError::MissingAction),
    };

    serde_json::from_value(value).map_err(|source| ProtocolError::InvalidPayload { action, source })
}

//! Oracle Admin Protocol - Shared types for server and client communication
//!
//! Every frame on the socket is a JSON object carrying an `"action"` string;
//! the reply to a request echoes the request's action. This crate contains:
//! - [`Action`], the closed set of action strings
//! - [`ClientMessage`] / [`ServerMessage`], the tagged message enums
//! - [`StatusFlag`], the `"True"`/other success flag
//! - the boundary decoder that rejects unknown actions explicitly
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - serde, serde_json, thiserror and the domain vocabulary
//! 2. **No business logic** - pure data types and serialization
//! 3. **No correlation ids** - a reply is matched to its request by action only

pub mod action;
pub mod codec;
pub mod messages;

pub use action::Action;
pub use codec::{decode_client_message, decode_server_message, encode, ProtocolError};
pub use messages::{
    ClientMessage, ServerMessage, SkillEntry, StatusFlag, SupervisorEntry, UserStatus,
    WELCOME_MESSAGE,
};

//! Command bus and connection lifecycle.
//!
//! - `CommandBus`: queue requests for the socket writer (fire-and-forget)
//! - `ConnectionHandle`: request disconnect
//! - `ConnectionStateObserver`: read the socket state
//!
//! The websocket module connects these to the actual transport.

pub mod command_bus;
pub mod connection;

pub use command_bus::{CommandBus, CommandError};
pub use connection::{
    set_connection_state, ConnectionHandle, ConnectionState, ConnectionStateObserver,
};

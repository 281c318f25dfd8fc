//! Oracle Admin session client.
//!
//! One WebSocket connection to the admin backend, a command bus for outbound
//! requests, and a session service that turns replies into view changes. The
//! console adapter in [`ui`] stands in for the browser page.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod state;
pub mod ui;

pub use application::{SessionService, UiIntent};
pub use config::{ClientConfig, ConfigError};

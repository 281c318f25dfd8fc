//! Oracle Admin development server.
//!
//! Answers the admin protocol on one WebSocket endpoint, backed by an
//! in-memory directory.
//!
//! ## Structure
//!
//! - `infrastructure/` - port traits plus the clock, randomness and directory adapters
//! - `api/` - WebSocket entry point and connection tracking
//! - `app` - request handling
//! - `config` - environment settings

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;

pub use app::App;
pub use config::ServerConfig;

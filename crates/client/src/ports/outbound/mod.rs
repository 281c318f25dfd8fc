//! Outbound ports - interfaces for the rendering collaborator
//!
//! The session core never touches the terminal (or a DOM) directly; it calls
//! these traits and adapters decide how things look.

pub mod view_port;

pub use view_port::ViewPort;

#[cfg(any(test, feature = "testing"))]
pub use view_port::MockViewPort;

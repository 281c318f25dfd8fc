//! Ports - traits the core calls into.

pub mod outbound;

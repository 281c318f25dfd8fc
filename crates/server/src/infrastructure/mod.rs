//! Infrastructure - port traits and their in-process implementations.

pub mod clock;
pub mod memory_directory;
pub mod ports;

//! User interface adapters.

pub mod console;

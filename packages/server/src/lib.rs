//! Chime time broadcast server.
//!
//! Accepts WebSocket connections, assigns each client an identity and a
//! secret number, and broadcasts the current time to every connected client
//! on a fixed interval.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export the server entry point
pub use ui::{ServerConfig, ServerError, run};

//! Shared utilities for the Chime workspace.
//!
//! Logging setup and UTC time helpers used by both the server and the
//! client binaries.

pub mod logger;
pub mod time;

pub use logger::setup_logger;

//! Chime echo client.
//!
//! Connects to the time broadcast server, remembers the identity and secret
//! assigned in the welcome frame, and echoes the secret back whenever a
//! broadcast arrives.

pub mod error;
pub mod session;

pub use error::ClientError;
pub use session::{ConnectionState, run_client};

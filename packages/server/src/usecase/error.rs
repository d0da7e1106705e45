//! UseCase layer error definitions.

use thiserror::Error;

/// Errors returned when registering a new session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// Identity or secret generation failed
    #[error("Failed to generate session identity")]
    IdentityGeneration,

    /// The generated identity collided with a registered session
    #[error("Session '{0}' is already registered")]
    DuplicateSession(String),
}

/// Errors returned when deregistering a session
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeregisterError {
    /// No session with the given identity exists
    #[error("Session '{0}' not found")]
    SessionNotFound(String),
}

/// Errors returned when confirming an echoed secret
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfirmError {
    /// No session with the given identity exists
    #[error("Session '{0}' not found")]
    SessionNotFound(String),
}

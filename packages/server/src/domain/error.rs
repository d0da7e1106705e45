//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// SessionId validation error
    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    /// SessionId too long error
    #[error("SessionId cannot exceed {max} characters (got {actual})")]
    SessionIdTooLong { max: usize, actual: usize },

    /// Secret out of range error
    #[error("Secret must be in 0..={max} (got {actual})")]
    SecretOutOfRange { max: u16, actual: u16 },
}

/// Errors related to Registry domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A session with the same identity is already registered
    #[error("Session '{0}' is already registered")]
    DuplicateSession(String),
}

/// Errors returned by SessionRepository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No session with the given identity exists
    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    /// A session with the same identity is already registered
    #[error("Session '{0}' is already registered")]
    DuplicateSession(String),
}

//! Domain factories for creating domain entities and value objects.

use super::{
    error::ValueObjectError,
    value_object::{SECRET_MAX, Secret, SessionId},
};

/// Factory for generating SessionId instances.
///
/// This factory encapsulates the logic for generating new session
/// identifiers, separating the generation concern from the validation logic
/// in SessionId.
pub struct SessionIdFactory;

impl SessionIdFactory {
    /// Generate a new SessionId with a random UUID v4.
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for
    /// consistency with the domain error handling pattern.
    pub fn generate() -> Result<SessionId, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        SessionId::new(uuid.to_string())
    }
}

/// Factory for generating Secret instances.
pub struct SecretFactory;

impl SecretFactory {
    /// Generate a new Secret drawn uniformly from `0..=420`.
    ///
    /// # Errors
    ///
    /// The drawn value is always in range; Result is kept for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<Secret, ValueObjectError> {
        let value = rand::random_range(0..=SECRET_MAX);
        Secret::new(value)
    }
}

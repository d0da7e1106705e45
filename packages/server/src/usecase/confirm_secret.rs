//! UseCase: secret confirmation.
//!
//! Checks an echoed secret against the session's assigned value and records
//! the match. A mismatch is not an error; the connection stays open either
//! way.

use std::sync::Arc;

use crate::domain::{SessionId, SessionRepository};

use super::error::ConfirmError;

/// Secret confirmation usecase
pub struct ConfirmSecretUseCase {
    /// Repository (data access abstraction)
    repository: Arc<dyn SessionRepository>,
}

impl ConfirmSecretUseCase {
    /// Create a new ConfirmSecretUseCase
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Check `offered` against the session's secret
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - the offered value matched; the session is marked
    ///   confirmed
    /// * `Ok(false)` - the offered value did not match
    /// * `Err(ConfirmError)` - no such session
    pub async fn execute(&self, uid: &SessionId, offered: i64) -> Result<bool, ConfirmError> {
        let session = self
            .repository
            .get_session(uid)
            .await
            .map_err(|_| ConfirmError::SessionNotFound(uid.as_str().to_string()))?;

        if i64::from(session.secret.value()) != offered {
            return Ok(false);
        }

        self.repository
            .confirm_secret(uid)
            .await
            .map_err(|_| ConfirmError::SessionNotFound(uid.as_str().to_string()))?;

        Ok(true)
    }
}

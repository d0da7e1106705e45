//! UseCase: session registration.
//!
//! Generates a fresh identity and secret for an accepted connection and
//! records the session, together with its outbound channel, in the
//! repository. The returned Session is what the connection handler turns
//! into the welcome frame, so identity and secret are generated exactly once
//! per connection.

use std::sync::Arc;

use chime_shared::time::utc_timestamp_millis;

use crate::domain::{
    SecretFactory, Session, SessionIdFactory, SessionRepository, Timestamp,
};

use super::error::RegisterError;

/// Session registration usecase
pub struct RegisterSessionUseCase {
    /// Repository (data access abstraction)
    repository: Arc<dyn SessionRepository>,
}

impl RegisterSessionUseCase {
    /// Create a new RegisterSessionUseCase
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Register a new session for an accepted connection
    ///
    /// # Arguments
    ///
    /// * `sender` - The connection's outbound message channel
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - the freshly registered session (source of the
    ///   welcome frame)
    /// * `Err(RegisterError)` - registration failed
    pub async fn execute(
        &self,
        sender: tokio::sync::mpsc::UnboundedSender<String>,
    ) -> Result<Session, RegisterError> {
        let uid = SessionIdFactory::generate().map_err(|_| RegisterError::IdentityGeneration)?;
        let secret = SecretFactory::generate().map_err(|_| RegisterError::IdentityGeneration)?;

        let session = Session::new(uid, secret, Timestamp::new(utc_timestamp_millis()));

        self.repository
            .add_session(session.clone(), sender)
            .await
            .map_err(|_| {
                RegisterError::DuplicateSession(session.uid.as_str().to_string())
            })?;

        Ok(session)
    }
}

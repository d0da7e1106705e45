//! UseCase: session removal.
//!
//! Removes a session from the registry when its connection ends, whichever
//! side closed first. A removed session is never revisited: its outbound
//! channel is dropped together with the registry entry.

use std::sync::Arc;

use crate::domain::{SessionId, SessionRepository};

use super::error::DeregisterError;

/// Session removal usecase
pub struct DeregisterSessionUseCase {
    /// Repository (data access abstraction)
    repository: Arc<dyn SessionRepository>,
}

impl DeregisterSessionUseCase {
    /// Create a new DeregisterSessionUseCase
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Remove a session by identity
    pub async fn execute(&self, uid: &SessionId) -> Result<(), DeregisterError> {
        self.repository
            .remove_session(uid)
            .await
            .map_err(|_| DeregisterError::SessionNotFound(uid.as_str().to_string()))?;

        Ok(())
    }

    /// Number of sessions still registered
    pub async fn count_remaining_sessions(&self) -> usize {
        self.repository.count_sessions().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Registry, Secret, Session, Timestamp},
        infrastructure::repository::InMemorySessionRepository,
    };
    use chime_shared::time::utc_timestamp_millis;
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    fn create_test_repository() -> Arc<InMemorySessionRepository> {
        let connected_clients = Arc::new(Mutex::new(HashMap::new()));
        let registry = Arc::new(Mutex::new(Registry::new()));
        Arc::new(InMemorySessionRepository::new(connected_clients, registry))
    }

    fn make_session(uid: &str, secret: u16) -> Session {
        Session::new(
            SessionId::new(uid.to_string()).unwrap(),
            Secret::new(secret).unwrap(),
            Timestamp::new(utc_timestamp_millis()),
        )
    }

    #[tokio::test]
    async fn test_deregister_session_success() {
        // given (precondition):
        let repository = create_test_repository();
        let usecase = DeregisterSessionUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        repository
            .add_session(make_session("abc", 7), tx)
            .await
            .unwrap();

        // when (operation):
        let abc = SessionId::new("abc".to_string()).unwrap();
        let result = usecase.execute(&abc).await;

        // then (expected result): the session is absent from the next
        // registry read
        assert!(result.is_ok());
        assert_eq!(repository.count_sessions().await, 0);
        assert!(repository.get_session(&abc).await.is_err());
    }

    #[tokio::test]
    async fn test_deregister_nonexistent_session() {
        // given (precondition):
        let repository = create_test_repository();
        let usecase = DeregisterSessionUseCase::new(repository);

        // when (operation):
        let ghost = SessionId::new("ghost".to_string()).unwrap();
        let result = usecase.execute(&ghost).await;

        // then (expected result):
        assert_eq!(
            result,
            Err(DeregisterError::SessionNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_deregister_leaves_other_sessions_untouched() {
        // given (precondition): two registered sessions
        let repository = create_test_repository();
        let usecase = DeregisterSessionUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        repository
            .add_session(make_session("abc", 7), tx1)
            .await
            .unwrap();
        repository
            .add_session(make_session("def", 9), tx2)
            .await
            .unwrap();

        // when (operation):
        let abc = SessionId::new("abc".to_string()).unwrap();
        usecase.execute(&abc).await.unwrap();

        // then (expected result):
        assert_eq!(usecase.count_remaining_sessions().await, 1);
        let def = SessionId::new("def".to_string()).unwrap();
        assert!(repository.get_session(&def).await.is_ok());
    }
}

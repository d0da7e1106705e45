//! UseCase: broadcast fan-out.
//!
//! Enqueues one payload to every registered session's outbound channel.
//! Iteration runs over a point-in-time snapshot of the registry, so sessions
//! may connect or disconnect concurrently without disturbing the fan-out.
//! Delivery to the socket is the connection handler's job; a failed enqueue
//! means the handler already went away and is only logged here.

use std::sync::Arc;

use crate::domain::SessionRepository;

/// Broadcast fan-out usecase
pub struct BroadcastTimeUseCase {
    /// Repository (data access abstraction)
    repository: Arc<dyn SessionRepository>,
}

impl BroadcastTimeUseCase {
    /// Create a new BroadcastTimeUseCase
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Enqueue `payload` to every currently registered session
    ///
    /// # Returns
    ///
    /// The number of sessions whose queue accepted the payload.
    pub async fn execute(&self, payload: &str) -> usize {
        // Snapshot-then-iterate: the lock is released before any send
        let targets = self.repository.snapshot_senders().await;

        let mut delivered = 0;
        for (uid, sender) in targets {
            if sender.send(payload.to_string()).is_ok() {
                delivered += 1;
            } else {
                tracing::warn!("Failed to enqueue broadcast for session '{}'", uid);
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Registry, Secret, Session, SessionId, Timestamp},
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
    async fn test_broadcast_reaches_all_registered_sessions() {
        // given (precondition): three registered sessions
        let repository = create_test_repository();
        let usecase = BroadcastTimeUseCase::new(repository.clone());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        repository
            .add_session(make_session("abc", 1), tx1)
            .await
            .unwrap();
        repository
            .add_session(make_session("def", 2), tx2)
            .await
            .unwrap();
        repository
            .add_session(make_session("ghi", 3), tx3)
            .await
            .unwrap();

        // when (operation):
        let delivered = usecase.execute(r#"{"message":"now"}"#).await;

        // then (expected result): all three queues received the payload
        assert_eq!(delivered, 3);
        assert_eq!(rx1.recv().await.unwrap(), r#"{"message":"now"}"#);
        assert_eq!(rx2.recv().await.unwrap(), r#"{"message":"now"}"#);
        assert_eq!(rx3.recv().await.unwrap(), r#"{"message":"now"}"#);
    }

    #[tokio::test]
    async fn test_broadcast_skips_sessions_removed_before_enqueue() {
        // given (precondition): two sessions, one deregistered before the
        // broadcast
        let repository = create_test_repository();
        let usecase = BroadcastTimeUseCase::new(repository.clone());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        repository
            .add_session(make_session("abc", 1), tx1)
            .await
            .unwrap();
        repository
            .add_session(make_session("def", 2), tx2)
            .await
            .unwrap();

        let abc = SessionId::new("abc".to_string()).unwrap();
        repository.remove_session(&abc).await.unwrap();

        // when (operation):
        let delivered = usecase.execute(r#"{"message":"now"}"#).await;

        // then (expected result): only the remaining session is reached
        assert_eq!(delivered, 1);
        assert_eq!(rx2.recv().await.unwrap(), r#"{"message":"now"}"#);
        assert!(rx1.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_with_empty_registry() {
        // given (precondition):
        let repository = create_test_repository();
        let usecase = BroadcastTimeUseCase::new(repository);

        // when (operation):
        let delivered = usecase.execute(r#"{"message":"now"}"#).await;

        // then (expected result): nothing to deliver, no panic
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_broadcast_counts_only_live_queues() {
        // given (precondition): one live channel and one whose receiver was
        // dropped (the handler is gone but the session lingers)
        let repository = create_test_repository();
        let usecase = BroadcastTimeUseCase::new(repository.clone());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        drop(rx2);
        repository
            .add_session(make_session("abc", 1), tx1)
            .await
            .unwrap();
        repository
            .add_session(make_session("def", 2), tx2)
            .await
            .unwrap();

        // when (operation):
        let delivered = usecase.execute(r#"{"message":"now"}"#).await;

        // then (expected result): the dead queue is not counted
        assert_eq!(delivered, 1);
        assert_eq!(rx1.recv().await.unwrap(), r#"{"message":"now"}"#);
    }
}

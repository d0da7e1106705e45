//! Repository trait for session storage.
//!
//! The domain layer defines the trait; infrastructure provides the concrete
//! implementation (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    entity::Session,
    error::RepositoryError,
    value_object::SessionId,
};

/// Data access abstraction over the session registry.
///
/// All registry mutation goes through an implementation of this trait, which
/// is responsible for guarding shared state against concurrent access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a session together with its outbound message channel
    async fn add_session(
        &self,
        session: Session,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError>;

    /// Remove a session and its channel by identity
    async fn remove_session(&self, uid: &SessionId) -> Result<(), RepositoryError>;

    /// Get a session by identity
    async fn get_session(&self, uid: &SessionId) -> Result<Session, RepositoryError>;

    /// Mark a session's secret as confirmed
    async fn confirm_secret(&self, uid: &SessionId) -> Result<(), RepositoryError>;

    /// Point-in-time copy of every registered identity and its outbound
    /// channel. Callers iterate the snapshot without holding any lock.
    async fn snapshot_senders(&self) -> Vec<(String, UnboundedSender<String>)>;

    /// All active sessions
    async fn get_sessions(&self) -> Vec<Session>;

    /// Number of active sessions
    async fn count_sessions(&self) -> usize;
}

//! In-memory SessionRepository implementation.
//!
//! Concrete implementation of the SessionRepository trait defined by the
//! domain layer, backed by a mutex-guarded HashMap. Both the outbound
//! channels and the domain Registry live behind locks; the two structures
//! are kept in sync on every insert and remove.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{Registry, RepositoryError, Session, SessionId, SessionRepository},
    ui::state::ClientInfo,
};

/// In-memory SessionRepository implementation
///
/// Uses a HashMap as the in-memory store. Implements the domain layer's
/// SessionRepository trait (dependency inversion).
pub struct InMemorySessionRepository {
    /// Outbound channels of connected clients, keyed by uid
    connected_clients: Arc<Mutex<HashMap<String, ClientInfo>>>,
    /// Registry domain model
    registry: Arc<Mutex<Registry>>,
}

impl InMemorySessionRepository {
    /// Create a new InMemorySessionRepository
    pub fn new(
        connected_clients: Arc<Mutex<HashMap<String, ClientInfo>>>,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        Self {
            connected_clients,
            registry,
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn add_session(
        &self,
        session: Session,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError> {
        let uid = session.uid.as_str().to_string();
        let connected_at = session.connected_at.value();

        // First, try to add to the registry (domain model handles the
        // duplicate check)
        {
            let mut registry = self.registry.lock().await;
            registry
                .add_session(session)
                .map_err(|_| RepositoryError::DuplicateSession(uid.clone()))?;
        }

        // Only if registry addition succeeds, store the outbound channel
        let mut clients = self.connected_clients.lock().await;
        clients.insert(
            uid,
            ClientInfo {
                sender,
                connected_at,
            },
        );

        Ok(())
    }

    async fn remove_session(&self, uid: &SessionId) -> Result<(), RepositoryError> {
        // Remove the outbound channel
        let mut clients = self.connected_clients.lock().await;
        clients
            .remove(uid.as_str())
            .ok_or_else(|| RepositoryError::SessionNotFound(uid.as_str().to_string()))?;

        // Remove from the registry
        let mut registry = self.registry.lock().await;
        registry.remove_session(uid);

        Ok(())
    }

    async fn get_session(&self, uid: &SessionId) -> Result<Session, RepositoryError> {
        let registry = self.registry.lock().await;
        registry
            .get_session(uid)
            .cloned()
            .ok_or_else(|| RepositoryError::SessionNotFound(uid.as_str().to_string()))
    }

    async fn confirm_secret(&self, uid: &SessionId) -> Result<(), RepositoryError> {
        let mut registry = self.registry.lock().await;
        if registry.confirm_secret(uid) {
            Ok(())
        } else {
            Err(RepositoryError::SessionNotFound(uid.as_str().to_string()))
        }
    }

    async fn snapshot_senders(&self) -> Vec<(String, UnboundedSender<String>)> {
        let clients = self.connected_clients.lock().await;
        clients
            .iter()
            .map(|(uid, info)| (uid.clone(), info.sender.clone()))
            .collect()
    }

    async fn get_sessions(&self) -> Vec<Session> {
        let registry = self.registry.lock().await;
        registry.sessions.clone()
    }

    async fn count_sessions(&self) -> usize {
        let clients = self.connected_clients.lock().await;
        clients.len()
    }
}

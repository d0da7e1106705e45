//! Core domain models for the time broadcast server.

use serde::{Deserialize, Serialize};

use super::{
    error::RegistryError,
    value_object::{Secret, SessionId, Timestamp},
};

/// Server-side record of one connected client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Identity assigned at connect time
    pub uid: SessionId,
    /// Secret number assigned at connect time
    pub secret: Secret,
    /// Timestamp when the client connected
    pub connected_at: Timestamp,
    /// Whether the client has echoed its secret back
    pub secret_confirmed: bool,
}

impl Session {
    /// Create a new session; the secret starts unconfirmed
    pub fn new(uid: SessionId, secret: Secret, connected_at: Timestamp) -> Self {
        Self {
            uid,
            secret,
            connected_at,
            secret_confirmed: false,
        }
    }
}

/// The set of currently active sessions known to the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    /// Active sessions, one per live connection
    pub sessions: Vec<Session>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
        }
    }

    /// Add a session to the registry
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateSession` if a session with the same
    /// identity is already registered
    pub fn add_session(&mut self, session: Session) -> Result<(), RegistryError> {
        if self.sessions.iter().any(|s| s.uid == session.uid) {
            return Err(RegistryError::DuplicateSession(
                session.uid.as_str().to_string(),
            ));
        }
        self.sessions.push(session);
        Ok(())
    }

    /// Remove a session from the registry by identity
    pub fn remove_session(&mut self, uid: &SessionId) {
        self.sessions.retain(|s| &s.uid != uid);
    }

    /// Get a session by identity
    pub fn get_session(&self, uid: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| &s.uid == uid)
    }

    /// Mark a session's secret as confirmed
    ///
    /// Returns `false` if no session with the given identity exists.
    pub fn confirm_secret(&mut self, uid: &SessionId) -> bool {
        match self.sessions.iter_mut().find(|s| &s.uid == uid) {
            Some(session) => {
                session.secret_confirmed = true;
                true
            }
            None => false,
        }
    }

    /// Number of active sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

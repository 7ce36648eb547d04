use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::catalog::DiseaseCatalog;

use super::session::{Session, TranscriptEntry};
use super::types::TriageError;

/// In-memory session store backed by RwLock. Sessions live for the process
/// lifetime or until explicitly ended; nothing is persisted.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session. Returns its id and the opening assistant message.
    pub fn create(&self, catalog: Arc<DiseaseCatalog>) -> Result<(Uuid, String), TriageError> {
        let session = Session::new(catalog);
        let id = session.id();
        let greeting = session
            .transcript()
            .first()
            .map(|e| e.content.clone())
            .unwrap_or_default();

        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;
        sessions.insert(id, session);

        tracing::info!(session_id = %id, "Session created");
        Ok((id, greeting))
    }

    /// Feed one patient message to a session, returning assistant replies.
    pub fn message(&self, id: &Uuid, input: &str) -> Result<Vec<String>, TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;
        let session = sessions
            .get_mut(id)
            .ok_or(TriageError::SessionNotFound(*id))?;
        Ok(session.handle_message(input))
    }

    /// Full conversation history of a session.
    pub fn transcript(&self, id: &Uuid) -> Result<Vec<TranscriptEntry>, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockFailed)?;
        let session = sessions.get(id).ok_or(TriageError::SessionNotFound(*id))?;
        Ok(session.transcript().to_vec())
    }

    /// End a session and drop its state.
    pub fn remove(&self, id: &Uuid) -> Result<(), TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;
        sessions
            .remove(id)
            .map(|_| tracing::info!(session_id = %id, "Session removed"))
            .ok_or(TriageError::SessionNotFound(*id))
    }

    pub fn count(&self) -> Result<usize, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockFailed)?;
        Ok(sessions.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

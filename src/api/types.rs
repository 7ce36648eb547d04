//! Shared state for the triage API layer.

use std::sync::Arc;

use crate::catalog::DiseaseCatalog;
use crate::triage::store::SessionStore;

/// Shared context for all API routes: the immutable disease catalog and the
/// live chat sessions.
#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Arc<DiseaseCatalog>,
    pub sessions: Arc<SessionStore>,
}

impl ApiContext {
    pub fn new(catalog: Arc<DiseaseCatalog>) -> Self {
        Self {
            catalog,
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

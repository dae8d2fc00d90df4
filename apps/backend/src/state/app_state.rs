use std::sync::Arc;

use crate::store::SessionStore;

/// Application state containing shared resources
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Session store shared by every worker
    pub store: Arc<SessionStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
        }
    }
}

use std::sync::Arc;

use crate::config::Config;
use crate::offer::bands::BandTable;
use crate::session::store::SessionStore;
use crate::session::SessionManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only after startup.
    pub bands: Arc<BandTable>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config, bands: BandTable, store: Arc<dyn SessionStore>) -> Self {
        let sessions = SessionManager::new(store, config.session_ttl_secs);
        Self {
            config,
            bands: Arc::new(bands),
            sessions,
        }
    }
}

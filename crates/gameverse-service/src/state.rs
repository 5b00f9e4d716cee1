//! Application state.

use std::sync::Arc;

use gameverse_store::RocksStore;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend. Injected once at startup; handlers never open
    /// their own connections.
    pub store: Arc<RocksStore>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<RocksStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}

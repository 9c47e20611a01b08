//! Application state for the web layer.

use std::sync::Arc;

use crate::paging::PagingConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Paging configuration
    pub config: Arc<PagingConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(config: PagingConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

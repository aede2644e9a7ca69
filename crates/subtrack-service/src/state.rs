//! Application state.

use std::sync::Arc;

use subtrack_store::{Store, TotalCalculator};

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Total cost calculator over the same store.
    pub totals: TotalCalculator,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state around an owned store handle.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let totals = TotalCalculator::new(Arc::clone(&store));
        Self {
            store,
            totals,
            config,
        }
    }
}

//! Application state shared across handlers

use std::sync::Arc;

use application::ports::{ForecastPort, ReadingStorePort};

/// Station identity reported by `/api/meta`
#[derive(Debug, Clone)]
pub struct StationInfo {
    /// Human-readable place name
    pub place: String,
    /// IANA timezone identifier
    pub tz: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream forecast provider
    pub forecast: Arc<dyn ForecastPort>,
    /// Optional logged-readings store; endpoints backed by it answer 503
    /// when absent
    pub store: Option<Arc<dyn ReadingStorePort>>,
    /// Station identity
    pub station: StationInfo,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.is_some())
            .field("station", &self.station)
            .finish_non_exhaustive()
    }
}

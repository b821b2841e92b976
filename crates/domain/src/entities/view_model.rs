//! Client-side view model bundle
//!
//! The in-memory `{current, recent, daily}` bundle driving rendering. It is
//! owned by the refresh coordinator, committed wholesale on successful
//! fetches and serialized as a single document to the durable cache slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DailySummary, Reading};

/// The bundle of current/recent/daily data driving the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    /// Latest single reading, if any fetch has produced one
    pub current: Option<Reading>,
    /// Recent window of readings around now
    #[serde(default)]
    pub recent: Vec<Reading>,
    /// Daily summaries for the coming days
    #[serde(default)]
    pub daily: Vec<DailySummary>,
    /// Place label from `/api/meta`
    #[serde(default)]
    pub place: Option<String>,
    /// Instant of the last successful commit
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,
}

impl ViewModel {
    /// True when no fetch or cache hydration has produced any data yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.recent.is_empty() && self.daily.is_empty()
    }
}

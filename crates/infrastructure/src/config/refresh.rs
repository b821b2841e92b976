//! Dashboard refresh configuration.

use application::schedule::AttemptSchedule;
use application::services::FetchPlan;
use serde::{Deserialize, Serialize};

/// Refresh schedule, fetch plan and durable cache for the dashboard client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Per-attempt budgets and backoff policy
    #[serde(default)]
    pub schedule: AttemptSchedule,

    /// How much data each refresh asks for
    #[serde(default)]
    pub plan: FetchPlan,

    /// Poll interval in seconds; absent disables periodic refresh
    #[serde(default = "default_poll_secs")]
    pub poll_secs: Option<u64>,

    /// Path of the durable view-model cache file; absent disables caching
    #[serde(default)]
    pub cache_path: Option<String>,
}

#[allow(clippy::unnecessary_wraps)]
const fn default_poll_secs() -> Option<u64> {
    Some(600)
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            schedule: AttemptSchedule::default(),
            plan: FetchPlan::default(),
            poll_secs: default_poll_secs(),
            cache_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_config_default() {
        let config = RefreshConfig::default();
        assert_eq!(config.schedule.timeouts_secs, vec![30, 15, 10]);
        assert_eq!(config.plan.recent_hours, 12);
        assert!(config.cache_path.is_none());
    }

    #[test]
    fn poll_secs_defaults_when_absent() {
        let config: RefreshConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.poll_secs, Some(600));
    }

    #[test]
    fn poll_can_be_disabled() {
        let config: RefreshConfig = serde_json::from_str(r#"{"poll_secs":null}"#).unwrap();
        assert!(config.poll_secs.is_none());
    }
}

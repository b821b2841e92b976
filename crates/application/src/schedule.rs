//! Declarative attempt schedule with exponential backoff
//!
//! Each refresh cycle walks a fixed list of per-attempt time budgets.
//! The first attempt gets a generous budget (a cold upstream may be slow
//! to answer), later attempts get progressively tighter ones so a dead
//! network fails fast. Between attempts the coordinator sleeps an
//! exponentially growing backoff, with optional jitter to prevent
//! thundering herd.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-attempt time budgets and backoff policy for a refresh cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSchedule {
    /// Time budget for each attempt in seconds (default: [30, 15, 10])
    #[serde(default = "default_timeouts_secs")]
    pub timeouts_secs: Vec<u64>,

    /// Base backoff delay in milliseconds (default: 500ms)
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Whether to add jitter to backoff delays (default: true)
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,

    /// Maximum jitter factor (0.0 to 1.0, default: 0.1 = 10%)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

fn default_timeouts_secs() -> Vec<u64> {
    vec![30, 15, 10]
}

const fn default_backoff_base_ms() -> u64 {
    500
}

const fn default_true() -> bool {
    true
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for AttemptSchedule {
    fn default() -> Self {
        Self {
            timeouts_secs: default_timeouts_secs(),
            backoff_base_ms: default_backoff_base_ms(),
            jitter_enabled: default_true(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl AttemptSchedule {
    /// Create a schedule from explicit budgets and backoff base
    #[must_use]
    pub const fn new(timeouts_secs: Vec<u64>, backoff_base_ms: u64) -> Self {
        Self {
            timeouts_secs,
            backoff_base_ms,
            jitter_enabled: true,
            jitter_factor: 0.1,
        }
    }

    /// Disable jitter (useful for deterministic tests)
    #[must_use]
    pub fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Number of attempts in a refresh cycle
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.timeouts_secs.len()
    }

    /// Time budget for the attempt at `index`, or `None` past the schedule
    #[must_use]
    pub fn budget(&self, index: usize) -> Option<Duration> {
        self.timeouts_secs.get(index).map(|&s| Duration::from_secs(s))
    }

    /// Backoff delay to sleep after the failed attempt at `index`
    ///
    /// Grows exponentially: `base * 2^index`, plus jitter when enabled.
    #[must_use]
    pub fn backoff_after(&self, index: usize) -> Duration {
        let exp = u32::try_from(index.min(16)).unwrap_or(16);
        let base_ms = self.backoff_base_ms.saturating_mul(2u64.saturating_pow(exp));

        let delay_ms = if self.jitter_enabled && self.jitter_factor > 0.0 {
            let max_jitter = (base_ms as f64 * self.jitter_factor) as u64;
            if max_jitter > 0 {
                base_ms + rand::rng().random_range(0..=max_jitter)
            } else {
                base_ms
            }
        } else {
            base_ms
        };

        Duration::from_millis(delay_ms)
    }
}

//! Resilient refresh coordinator
//!
//! Drives the dashboard's view model from the query service. Each refresh
//! cycle issues the four logical sub-requests (metadata, current
//! conditions, recent hourly window, daily aggregates) concurrently, each
//! bounded by the attempt's time budget. An attempt that yields at least
//! one successful part is committed immediately; only a cycle in which
//! every attempt yields nothing signals degraded connectivity, and in
//! that case the previously committed view model is left untouched.
//!
//! Commits are serialized by a monotonically increasing token so a slow
//! earlier refresh can never overwrite the result of a later one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use domain::entities::{DailySummary, Reading, ViewModel};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, timeout};
use tracing::{debug, info, warn};

use crate::error::ApplicationError;
use crate::ports::{BundleCachePort, QueryApiPort, StationMeta};
use crate::schedule::AttemptSchedule;

/// Connectivity signal published after every refresh cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// No refresh has completed yet
    #[default]
    Unknown,
    /// The last refresh committed at least one part
    Fresh,
    /// The last refresh exhausted its schedule without any success
    Degraded,
}

/// How much data each refresh asks the query service for
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FetchPlan {
    /// Hourly window size in samples (default: 12)
    #[serde(default = "default_recent_hours")]
    pub recent_hours: u32,
    /// How many of those samples lie before now (default: 3)
    #[serde(default = "default_recent_past")]
    pub recent_past: u32,
    /// Days of daily aggregates (default: 7)
    #[serde(default = "default_daily_days")]
    pub daily_days: u32,
}

const fn default_recent_hours() -> u32 {
    12
}

const fn default_recent_past() -> u32 {
    3
}

const fn default_daily_days() -> u32 {
    7
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            recent_hours: default_recent_hours(),
            recent_past: default_recent_past(),
            daily_days: default_daily_days(),
        }
    }
}

/// Result of one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Attempts spent, including the successful one
    pub attempts: u32,
    /// Number of parts (0-4) written into the view model
    pub committed: usize,
    /// Connectivity signal after this cycle
    pub freshness: Freshness,
}

struct CoordinatorState {
    view: ViewModel,
    /// Token of the most recently committed refresh; commits from an
    /// earlier token are discarded as stale.
    committed_token: u64,
}

/// Coordinates periodic, failure-tolerant refreshes of the dashboard
/// view model
pub struct RefreshCoordinator {
    api: Arc<dyn QueryApiPort>,
    cache: Option<Arc<dyn BundleCachePort>>,
    schedule: AttemptSchedule,
    plan: FetchPlan,
    state: RwLock<CoordinatorState>,
    next_token: AtomicU64,
    status_tx: watch::Sender<Freshness>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshCoordinator {
    /// Create a coordinator over the given client port
    #[must_use]
    pub fn new(
        api: Arc<dyn QueryApiPort>,
        cache: Option<Arc<dyn BundleCachePort>>,
        schedule: AttemptSchedule,
        plan: FetchPlan,
    ) -> Self {
        let (status_tx, _) = watch::channel(Freshness::Unknown);
        Self {
            api,
            cache,
            schedule,
            plan,
            state: RwLock::new(CoordinatorState {
                view: ViewModel::default(),
                committed_token: 0,
            }),
            next_token: AtomicU64::new(0),
            status_tx,
            poll_task: Mutex::new(None),
        }
    }

    /// Snapshot of the current view model
    #[must_use]
    pub fn view(&self) -> ViewModel {
        self.state.read().view.clone()
    }

    /// Subscribe to connectivity signals
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Freshness> {
        self.status_tx.subscribe()
    }

    /// Populate an empty view model from the durable cache
    ///
    /// Synchronous and network-free. Does nothing when no cache is
    /// configured, the cache slot is missing or unreadable, or a refresh
    /// has already committed.
    pub fn hydrate_from_cache(&self) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };
        let Some(loaded) = cache.load() else {
            return false;
        };
        let mut state = self.state.write();
        if state.committed_token != 0 || !state.view.is_empty() {
            return false;
        }
        debug!("hydrated view model from durable cache");
        state.view = loaded;
        true
    }

    /// Run one refresh cycle through the attempt schedule
    ///
    /// Never fails: a fully unsuccessful cycle reports
    /// `Freshness::Degraded` and leaves the view model as it was.
    pub async fn refresh(&self) -> RefreshOutcome {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst) + 1;
        let total = self.schedule.attempts();

        for index in 0..total {
            if index > 0 {
                tokio::time::sleep(self.schedule.backoff_after(index - 1)).await;
            }
            let Some(budget) = self.schedule.budget(index) else {
                break;
            };

            let (meta_r, current_r, recent_r, daily_r) = tokio::join!(
                timeout(budget, self.api.meta()),
                timeout(budget, self.api.current()),
                timeout(
                    budget,
                    self.api.recent(self.plan.recent_hours, self.plan.recent_past)
                ),
                timeout(budget, self.api.daily(self.plan.daily_days)),
            );

            let meta = settle("meta", meta_r);
            let current = settle("current", current_r);
            let recent = settle("recent", recent_r);
            let daily = settle("daily", daily_r);

            let successes = usize::from(meta.is_some())
                + usize::from(current.is_some())
                + usize::from(recent.is_some())
                + usize::from(daily.is_some());

            if successes > 0 {
                let committed = self.commit(token, meta, current, recent, daily);
                let attempts = u32::try_from(index + 1).unwrap_or(u32::MAX);
                if committed == 0 {
                    // A later refresh already committed; keep its signal.
                    debug!(token, "discarding stale refresh result");
                    let freshness = *self.status_tx.borrow();
                    return RefreshOutcome {
                        attempts,
                        committed: 0,
                        freshness,
                    };
                }
                info!(attempts, parts = committed, "refresh committed");
                self.status_tx.send_replace(Freshness::Fresh);
                return RefreshOutcome {
                    attempts,
                    committed,
                    freshness: Freshness::Fresh,
                };
            }

            debug!(attempt = index + 1, total, "refresh attempt yielded nothing");
        }

        let attempts = u32::try_from(total).unwrap_or(u32::MAX);
        {
            // Degraded is gated by the same token order as commits: a cycle
            // superseded by a newer commit must not overwrite its signal.
            let state = self.state.read();
            if state.committed_token > token {
                debug!(token, "discarding stale degraded result");
                let freshness = *self.status_tx.borrow();
                return RefreshOutcome {
                    attempts,
                    committed: 0,
                    freshness,
                };
            }
            warn!(attempts = total, "refresh exhausted schedule, degraded");
            self.status_tx.send_replace(Freshness::Degraded);
        }
        RefreshOutcome {
            attempts,
            committed: 0,
            freshness: Freshness::Degraded,
        }
    }

    /// Start, replace, or stop the periodic refresh loop
    ///
    /// At most one loop runs at a time; the previous one is aborted
    /// before a new one starts. Passing `None` only stops polling.
    pub fn set_poll_interval(self: &Arc<Self>, interval: Option<Duration>) {
        let mut guard = self.poll_task.lock();
        if let Some(handle) = guard.take() {
            handle.abort();
        }
        let Some(every) = interval else {
            return;
        };
        let this = Arc::clone(self);
        *guard = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let _ = this.refresh().await;
            }
        }));
    }

    /// Merge successful parts into the view model under the commit token
    ///
    /// Returns how many parts were written, or 0 when `token` has been
    /// superseded by a later commit.
    fn commit(
        &self,
        token: u64,
        meta: Option<StationMeta>,
        current: Option<Reading>,
        recent: Option<Vec<Reading>>,
        daily: Option<Vec<DailySummary>>,
    ) -> usize {
        let mut written = 0usize;
        let snapshot = {
            let mut state = self.state.write();
            if token <= state.committed_token {
                return 0;
            }
            state.committed_token = token;
            if let Some(m) = meta {
                state.view.place = Some(m.place);
                written += 1;
            }
            if let Some(c) = current {
                state.view.current = Some(c);
                written += 1;
            }
            if let Some(r) = recent {
                state.view.recent = r;
                written += 1;
            }
            if let Some(d) = daily {
                state.view.daily = d;
                written += 1;
            }
            state.view.fetched_at = Some(Utc::now());
            state.view.clone()
        };

        // Persistence is best-effort; a full disk must not break refresh.
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.store(&snapshot) {
                warn!(error = %err, "failed to persist view model cache");
            }
        }

        written
    }
}

fn settle<T>(
    part: &'static str,
    outcome: Result<Result<T, ApplicationError>, tokio::time::error::Elapsed>,
) -> Option<T> {
    match outcome {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            debug!(part, error = %err, "sub-request failed");
            None
        }
        Err(_) => {
            debug!(part, "sub-request timed out");
            None
        }
    }
}

impl Drop for RefreshCoordinator {
    fn drop(&mut self) {
        if let Some(handle) = self.poll_task.lock().take() {
            handle.abort();
        }
    }
}

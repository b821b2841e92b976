//! Logged-readings store port
//!
//! Read-only interface over the historical readings database. The query
//! service exposes these through its `/api/readings/*` endpoints; when no
//! store is configured the endpoints degrade rather than fail the whole
//! service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{DailySummary, Reading};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for read-only access to logged readings
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReadingStorePort: Send + Sync {
    /// Latest logged reading at or before `instant`, if any
    async fn latest_before(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<Option<Reading>, ApplicationError>;

    /// All readings with `from <= time_utc < to`, ascending
    async fn range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, ApplicationError>;

    /// All readings with `after < time_utc <= until`, ascending
    async fn next_within(
        &self,
        after: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Reading>, ApplicationError>;

    /// Per-local-date min/max temperature and precipitation totals for
    /// the most recent `days` days
    async fn daily_summaries(&self, days: u32) -> Result<Vec<DailySummary>, ApplicationError>;
}

//! Forecast provider port
//!
//! Interface for the upstream forecast provider. The adapter owns the
//! configured location; callers only say what shape of data they want.

use async_trait::async_trait;
use domain::entities::{DailySummary, Reading};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for upstream forecast retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ForecastPort: Send + Sync {
    /// Get the current conditions as a single reading
    async fn current(&self) -> Result<Reading, ApplicationError>;

    /// Get the hourly series spanning recent past and near future
    ///
    /// Returned readings carry both UTC instants and provider-local
    /// wall-clock labels. Order is not guaranteed; callers window the
    /// series themselves.
    async fn hourly(&self) -> Result<Vec<Reading>, ApplicationError>;

    /// Get per-day aggregates for the next `days` days
    async fn daily(&self, days: u8) -> Result<Vec<DailySummary>, ApplicationError>;
}

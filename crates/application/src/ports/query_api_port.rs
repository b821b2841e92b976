//! Query service client port
//!
//! Interface the dashboard client uses to talk to the query service. One
//! method per logical sub-request so the refresh coordinator can issue
//! them concurrently and tolerate partial failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{DailySummary, Reading};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Station metadata reported by the query service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationMeta {
    /// Human-readable place name
    pub place: String,
    /// IANA timezone identifier for the station location
    pub tz: String,
    /// Server's current instant
    pub now: DateTime<Utc>,
}

/// Port for the query service's dashboard API
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryApiPort: Send + Sync {
    /// Fetch station metadata
    async fn meta(&self) -> Result<StationMeta, ApplicationError>;

    /// Fetch the current conditions
    async fn current(&self) -> Result<Reading, ApplicationError>;

    /// Fetch the recent hourly window: `hours` samples with `past` of
    /// them before now
    async fn recent(&self, hours: u32, past: u32) -> Result<Vec<Reading>, ApplicationError>;

    /// Fetch daily aggregates for the next `days` days
    async fn daily(&self, days: u32) -> Result<Vec<DailySummary>, ApplicationError>;
}

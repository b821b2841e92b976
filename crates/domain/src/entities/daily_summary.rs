//! Per-day aggregate of readings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregated weather for one local calendar day
///
/// Derived either from the provider's daily block or by aggregating stored
/// readings. Within any sequence returned by the query service, dates are
/// strictly increasing with at most one summary per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Local calendar day
    pub date: NaiveDate,
    /// Minimum air temperature in °C
    pub tmin: Option<f64>,
    /// Maximum air temperature in °C
    pub tmax: Option<f64>,
    /// Total precipitation in mm
    pub rain: Option<f64>,
}

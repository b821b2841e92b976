//! Point-in-time weather reading
//!
//! A `Reading` is a single observation or forecast sample, produced either
//! by the forecast provider (ephemeral) or read back from the reading store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A point-in-time observation or forecast sample
///
/// All measurement fields are optional: a provider or store row may carry
/// only a subset, and consumers render placeholders for missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Absolute instant of the sample
    pub time_utc: DateTime<Utc>,
    /// Display string in the configured timezone
    pub time_local: String,
    /// Air temperature in °C
    pub air_temperature: Option<f64>,
    /// Relative humidity in percent (0-100)
    pub relative_humidity: Option<f64>,
    /// Wind speed in m/s
    pub wind_speed_ms: Option<f64>,
    /// Wind origin direction in degrees
    pub wind_from_deg: Option<f64>,
    /// Air pressure at sea level in hPa
    pub pressure_hpa: Option<f64>,
    /// Precipitation in mm
    pub precip_mm: Option<f64>,
    /// Provider symbol code (e.g. "rain", "clear_sky")
    #[serde(default)]
    pub symbol_code: Option<String>,
    /// Emoji display hint for the symbol
    #[serde(default)]
    pub symbol_emoji: Option<String>,
}

impl Reading {
    /// Create a reading carrying only a timestamp; measurements default to `None`
    #[must_use]
    pub fn at(time_utc: DateTime<Utc>, time_local: impl Into<String>) -> Self {
        Self {
            time_utc,
            time_local: time_local.into(),
            air_temperature: None,
            relative_humidity: None,
            wind_speed_ms: None,
            wind_from_deg: None,
            pressure_hpa: None,
            precip_mm: None,
            symbol_code: None,
            symbol_emoji: None,
        }
    }

    /// Parse an RFC 3339 timestamp into a UTC instant
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if the string is not a valid
    /// RFC 3339 timestamp.
    pub fn parse_time_utc(s: &str) -> Result<DateTime<Utc>, DomainError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| DomainError::InvalidDateTime(s.to_string()))
    }
}

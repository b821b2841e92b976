//! Open-Meteo API response models
//!
//! Mirrors the JSON shapes of <https://open-meteo.com/en/docs>. Every
//! value field is optional; the provider omits or nulls fields freely.

use serde::Deserialize;

/// Top-level forecast response
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Resolved latitude
    pub latitude: Option<f64>,
    /// Resolved longitude
    pub longitude: Option<f64>,
    /// Timezone the local times are expressed in
    pub timezone: Option<String>,
    /// Current conditions block
    pub current: Option<CurrentBlock>,
    /// Hourly series block
    pub hourly: Option<HourlyBlock>,
    /// Daily aggregates block
    pub daily: Option<DailyBlock>,
}

/// Current conditions block
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentBlock {
    /// Local wall-clock time, e.g. `2026-08-30T19:00`
    pub time: String,
    /// Air temperature in °C
    pub temperature_2m: Option<f64>,
    /// Relative humidity in %
    pub relative_humidity_2m: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_10m: Option<f64>,
    /// Wind direction in degrees
    pub wind_direction_10m: Option<f64>,
    /// Mean sea-level pressure in hPa
    pub pressure_msl: Option<f64>,
    /// Total precipitation in mm
    pub precipitation: Option<f64>,
    /// Rain in mm
    pub rain: Option<f64>,
    /// WMO weather code
    pub weather_code: Option<u8>,
}

/// Hourly series block (parallel arrays keyed by `time`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlyBlock {
    /// Local wall-clock times
    #[serde(default)]
    pub time: Vec<String>,
    /// Air temperatures in °C
    pub temperature_2m: Option<Vec<Option<f64>>>,
    /// Relative humidities in %
    pub relative_humidity_2m: Option<Vec<Option<f64>>>,
    /// Wind speeds in km/h
    pub wind_speed_10m: Option<Vec<Option<f64>>>,
    /// Wind directions in degrees
    pub wind_direction_10m: Option<Vec<Option<f64>>>,
    /// Mean sea-level pressures in hPa
    pub pressure_msl: Option<Vec<Option<f64>>>,
    /// Total precipitations in mm
    pub precipitation: Option<Vec<Option<f64>>>,
    /// Rain in mm
    pub rain: Option<Vec<Option<f64>>>,
    /// WMO weather codes
    pub weather_code: Option<Vec<Option<u8>>>,
}

/// Daily aggregates block (parallel arrays keyed by `time`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyBlock {
    /// Local dates, e.g. `2026-08-30`
    #[serde(default)]
    pub time: Vec<String>,
    /// Daily maximum temperatures in °C
    pub temperature_2m_max: Option<Vec<Option<f64>>>,
    /// Daily minimum temperatures in °C
    pub temperature_2m_min: Option<Vec<Option<f64>>>,
    /// Daily precipitation sums in mm
    pub precipitation_sum: Option<Vec<Option<f64>>>,
}

/// Value at `index` in an optional parallel array
pub(crate) fn column_value<T: Copy>(column: Option<&Vec<Option<T>>>, index: usize) -> Option<T> {
    column.and_then(|col| col.get(index).copied().flatten())
}

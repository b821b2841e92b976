//! Pure view-model rendering
//!
//! Deterministic: the same view model, unit, and instant always produce the
//! same lines. Missing values render as the `—` placeholder so a dashboard
//! with no data ever still draws a full layout.

use std::fmt;
use std::str::FromStr;

use application::services::Freshness;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::entities::{DailySummary, Reading, ViewModel};

/// Placeholder for missing values
const PLACEHOLDER: &str = "—";

/// Divider line between past and future hourly tiles
const DIVIDER: &str = "— next —";

/// Temperature display unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a Celsius value into this unit
    #[must_use]
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Format a temperature, with the placeholder for missing values
    #[must_use]
    pub fn format_temp(self, celsius: Option<f64>) -> String {
        celsius.map_or_else(
            || PLACEHOLDER.to_string(),
            |c| match self {
                Self::Celsius => format!("{:.1}°C", self.convert(c)),
                Self::Fahrenheit => format!("{:.1}°F", self.convert(c)),
            },
        )
    }

    /// The other unit
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(Self::Celsius),
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            other => Err(format!("unknown unit: {other} (use celsius or fahrenheit)")),
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius => write!(f, "celsius"),
            Self::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

/// Coarse sky classification for theming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyKind {
    Clear,
    Cloudy,
    Rain,
    Thunder,
}

impl SkyKind {
    /// Classify a reading's symbol code; anything unrecognized is Cloudy
    #[must_use]
    pub fn from_symbol(code: Option<&str>) -> Self {
        match code {
            Some("clear_sky" | "mainly_clear") => Self::Clear,
            Some("drizzle" | "rain" | "snow") => Self::Rain,
            Some("thunder") => Self::Thunder,
            _ => Self::Cloudy,
        }
    }
}

/// Day/night display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Day,
    Night,
}

impl Theme {
    /// Theme for a local wall-clock hour; night runs 18:00 through 05:59
    #[must_use]
    pub const fn for_hour(hour: u32) -> Self {
        if hour >= 6 && hour < 18 {
            Self::Day
        } else {
            Self::Night
        }
    }
}

/// Hour label for a reading, derived from its provider-local time
fn hour_label(reading: &Reading) -> String {
    reading
        .time_local
        .split('T')
        .nth(1)
        .and_then(|t| t.get(..5))
        .map_or_else(|| reading.time_local.clone(), ToString::to_string)
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.0}%"))
}

fn format_ms(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.1} m/s"))
}

fn format_hpa(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.0} hPa"))
}

fn format_mm(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.1} mm"))
}

/// Render the current-conditions panel
#[must_use]
pub fn render_current(view: &ViewModel, unit: TemperatureUnit) -> Vec<String> {
    let place = view.place.as_deref().unwrap_or(PLACEHOLDER);
    let Some(current) = &view.current else {
        return vec![format!("{place}  {PLACEHOLDER}")];
    };
    let emoji = current.symbol_emoji.as_deref().unwrap_or("");
    vec![
        format!(
            "{place}  {} {emoji}",
            unit.format_temp(current.air_temperature)
        )
        .trim_end()
        .to_string(),
        format!(
            "humidity {}  wind {}  pressure {}",
            format_pct(current.relative_humidity),
            format_ms(current.wind_speed_ms),
            format_hpa(current.pressure_hpa),
        ),
    ]
}

/// Render the hourly tiles with the past/future divider
///
/// The divider goes before the first reading at or after `now`, recomputed
/// here so a stale cached window still splits correctly against the
/// current clock.
#[must_use]
pub fn render_hourly(view: &ViewModel, unit: TemperatureUnit, now: DateTime<Utc>) -> Vec<String> {
    let divider = view
        .recent
        .iter()
        .position(|r| r.time_utc >= now)
        .unwrap_or(view.recent.len());

    let mut lines = Vec::with_capacity(view.recent.len() + 1);
    for (i, reading) in view.recent.iter().enumerate() {
        if i == divider {
            lines.push(DIVIDER.to_string());
        }
        let emoji = reading.symbol_emoji.as_deref().unwrap_or(" ");
        lines.push(format!(
            "{}  {} {emoji}",
            hour_label(reading),
            unit.format_temp(reading.air_temperature),
        ));
    }
    if divider == view.recent.len() {
        lines.push(DIVIDER.to_string());
    }
    lines
}

/// Render the daily-summary rows
#[must_use]
pub fn render_daily(view: &ViewModel, unit: TemperatureUnit) -> Vec<String> {
    view.daily.iter().map(|day| daily_row(day, unit)).collect()
}

fn daily_row(day: &DailySummary, unit: TemperatureUnit) -> String {
    format!(
        "{}  {} / {}  rain {}",
        day.date.format("%a %d"),
        unit.format_temp(day.tmin),
        unit.format_temp(day.tmax),
        format_mm(day.rain),
    )
}

/// Render the connectivity banner
#[must_use]
pub fn render_status(view: &ViewModel, freshness: Freshness) -> Vec<String> {
    let fetched = view.fetched_at.map_or_else(
        || PLACEHOLDER.to_string(),
        |t| t.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    match freshness {
        Freshness::Unknown => vec!["connecting...".to_string()],
        Freshness::Fresh => vec![format!("LIVE  updated {fetched}")],
        Freshness::Degraded => {
            vec![format!("OFFLINE  showing data from {fetched}")]
        }
    }
}

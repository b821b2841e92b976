//! Open-Meteo forecast client
//!
//! One upstream GET per logical block (current, hourly, daily). All
//! responses are normalized into domain records: wind km/h becomes m/s,
//! provider-local wall-clock times become UTC instants (the raw string
//! is kept as `time_local`), and WMO codes become symbol code + emoji.
//!
//! Precipitation precedence: `precipitation` first, then `rain`, else
//! absent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use domain::entities::{DailySummary, Reading};
use domain::value_objects::WeatherSymbol;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{CurrentBlock, DailyBlock, ForecastResponse, HourlyBlock, column_value};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m,\
     wind_direction_10m,pressure_msl,precipitation,rain,weather_code";

const HOURLY_FIELDS: &str = "temperature_2m,precipitation,rain,pressure_msl,\
     wind_speed_10m,wind_direction_10m,relative_humidity_2m,weather_code";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Provider client errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the provider response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Provider is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Configured timezone is not a valid IANA identifier
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    /// API base URL (default: <https://api.open-meteo.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Station latitude
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Station longitude
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA timezone the provider reports local times in
    #[serde(default = "default_tz")]
    pub tz: String,

    /// User agent sent with provider requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_latitude() -> f64 {
    13.7563
}

const fn default_longitude() -> f64 {
    100.5018
}

fn default_tz() -> String {
    "Asia/Bangkok".to_string()
}

fn default_user_agent() -> String {
    concat!("skylight/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            tz: default_tz(),
            user_agent: default_user_agent(),
        }
    }
}

/// Open-Meteo HTTP client
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: OpenMeteoConfig,
    tz: Tz,
}

impl OpenMeteoClient {
    /// Create a client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized or the
    /// configured timezone is not a valid IANA identifier.
    pub fn new(config: OpenMeteoConfig) -> Result<Self, ProviderError> {
        let tz: Tz = config
            .tz
            .parse()
            .map_err(|_| ProviderError::InvalidTimezone(config.tz.clone()))?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        Ok(Self { client, config, tz })
    }

    /// Create a client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, ProviderError> {
        Self::new(OpenMeteoConfig::default())
    }

    /// Fetch the current conditions as a single reading
    #[instrument(skip(self))]
    pub async fn current(&self) -> Result<Reading, ProviderError> {
        let response = self.fetch(&[("current", CURRENT_FIELDS.to_string())]).await?;
        let block = response
            .current
            .ok_or_else(|| ProviderError::ParseError("no current block in response".into()))?;
        self.normalize_current(&block)
    }

    /// Fetch the hourly series spanning yesterday through tomorrow
    ///
    /// Records with an unparsable timestamp are dropped, never fatal.
    #[instrument(skip(self))]
    pub async fn hourly(&self) -> Result<Vec<Reading>, ProviderError> {
        let response = self
            .fetch(&[
                ("hourly", HOURLY_FIELDS.to_string()),
                ("past_days", "1".to_string()),
                ("forecast_days", "2".to_string()),
            ])
            .await?;
        let block = response
            .hourly
            .ok_or_else(|| ProviderError::ParseError("no hourly block in response".into()))?;
        Ok(self.normalize_hourly(&block))
    }

    /// Fetch daily aggregates for the next `days` days (clamped 1-16)
    #[instrument(skip(self))]
    pub async fn daily(&self, days: u8) -> Result<Vec<DailySummary>, ProviderError> {
        let days = days.clamp(1, 16);
        let response = self
            .fetch(&[
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", days.to_string()),
            ])
            .await?;
        let block = response
            .daily
            .ok_or_else(|| ProviderError::ParseError("no daily block in response".into()))?;
        Ok(Self::normalize_daily(&block))
    }

    async fn fetch(&self, extra: &[(&str, String)]) -> Result<ForecastResponse, ProviderError> {
        let url = format!("{}/v1/forecast", self.config.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("latitude", self.config.latitude.to_string()),
            ("longitude", self.config.longitude.to_string()),
            ("timezone", self.config.tz.clone()),
        ];
        query.extend_from_slice(extra);

        debug!(url = %url, "Fetching forecast");
        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(ProviderError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(ProviderError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    fn normalize_current(&self, block: &CurrentBlock) -> Result<Reading, ProviderError> {
        let time_utc = self.parse_local(&block.time).ok_or_else(|| {
            ProviderError::ParseError(format!("invalid current time: {}", block.time))
        })?;
        let mut reading = Reading::at(time_utc, block.time.clone());
        reading.air_temperature = block.temperature_2m;
        reading.relative_humidity = block.relative_humidity_2m;
        reading.wind_speed_ms = kmh_to_ms(block.wind_speed_10m);
        reading.wind_from_deg = block.wind_direction_10m;
        reading.pressure_hpa = block.pressure_msl;
        reading.precip_mm = precip(block.precipitation, block.rain);
        apply_symbol(&mut reading, block.weather_code);
        Ok(reading)
    }

    fn normalize_hourly(&self, block: &HourlyBlock) -> Vec<Reading> {
        let mut readings = Vec::with_capacity(block.time.len());
        for (i, raw) in block.time.iter().enumerate() {
            let Some(time_utc) = self.parse_local(raw) else {
                warn!(time = %raw, "dropping hourly record with unparsable time");
                continue;
            };
            let mut reading = Reading::at(time_utc, raw.clone());
            reading.air_temperature = column_value(block.temperature_2m.as_ref(), i);
            reading.relative_humidity = column_value(block.relative_humidity_2m.as_ref(), i);
            reading.wind_speed_ms = kmh_to_ms(column_value(block.wind_speed_10m.as_ref(), i));
            reading.wind_from_deg = column_value(block.wind_direction_10m.as_ref(), i);
            reading.pressure_hpa = column_value(block.pressure_msl.as_ref(), i);
            reading.precip_mm = precip(
                column_value(block.precipitation.as_ref(), i),
                column_value(block.rain.as_ref(), i),
            );
            apply_symbol(&mut reading, column_value(block.weather_code.as_ref(), i));
            readings.push(reading);
        }
        readings
    }

    fn normalize_daily(block: &DailyBlock) -> Vec<DailySummary> {
        let mut summaries = Vec::with_capacity(block.time.len());
        for (i, raw) in block.time.iter().enumerate() {
            let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
                warn!(date = %raw, "dropping daily record with unparsable date");
                continue;
            };
            summaries.push(DailySummary {
                date,
                tmin: column_value(block.temperature_2m_min.as_ref(), i),
                tmax: column_value(block.temperature_2m_max.as_ref(), i),
                rain: column_value(block.precipitation_sum.as_ref(), i),
            });
        }
        summaries
    }

    /// Parse a provider-local wall-clock time into a UTC instant
    fn parse_local(&self, raw: &str) -> Option<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()?;
        // earliest() picks the pre-transition instant on DST folds.
        self.tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Provider wind speeds arrive in km/h; readings carry m/s
fn kmh_to_ms(kmh: Option<f64>) -> Option<f64> {
    kmh.map(|v| v / 3.6)
}

/// `precipitation` first, then `rain`, else absent
const fn precip(precipitation: Option<f64>, rain: Option<f64>) -> Option<f64> {
    match precipitation {
        Some(v) => Some(v),
        None => rain,
    }
}

fn apply_symbol(reading: &mut Reading, code: Option<u8>) {
    if let Some(code) = code {
        let symbol = WeatherSymbol::from_wmo_code(code);
        reading.symbol_code = Some(symbol.code().to_string());
        reading.symbol_emoji = Some(symbol.emoji().to_string());
    }
}

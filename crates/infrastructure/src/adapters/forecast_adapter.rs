//! Forecast adapter - Implements ForecastPort using integration_openmeteo

use application::error::ApplicationError;
use application::ports::ForecastPort;
use async_trait::async_trait;
use domain::entities::{DailySummary, Reading};
use integration_openmeteo::{OpenMeteoClient, OpenMeteoConfig, ProviderError};
use tracing::{debug, instrument};

/// Adapter for the Open-Meteo forecast provider
pub struct ForecastAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for ForecastAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl ForecastAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::with_defaults().map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize or the
    /// configured timezone is invalid.
    pub fn with_config(config: OpenMeteoConfig) -> Result<Self, ApplicationError> {
        let client = OpenMeteoClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map provider error to application error
    fn map_error(err: ProviderError) -> ApplicationError {
        match err {
            ProviderError::RequestFailed(e) | ProviderError::ServiceUnavailable(e) => {
                ApplicationError::ExternalService(e)
            },
            ProviderError::RateLimitExceeded => {
                ApplicationError::ExternalService("rate limit exceeded".into())
            },
            ProviderError::ParseError(e) => ApplicationError::Internal(e),
            ProviderError::InvalidTimezone(tz) => {
                ApplicationError::Configuration(format!("invalid timezone: {tz}"))
            },
        }
    }
}

#[async_trait]
impl ForecastPort for ForecastAdapter {
    #[instrument(skip(self))]
    async fn current(&self) -> Result<Reading, ApplicationError> {
        let reading = self.client.current().await.map_err(Self::map_error)?;
        debug!(time = %reading.time_utc, "Retrieved current conditions");
        Ok(reading)
    }

    #[instrument(skip(self))]
    async fn hourly(&self) -> Result<Vec<Reading>, ApplicationError> {
        let readings = self.client.hourly().await.map_err(Self::map_error)?;
        debug!(count = readings.len(), "Retrieved hourly series");
        Ok(readings)
    }

    #[instrument(skip(self))]
    async fn daily(&self, days: u8) -> Result<Vec<DailySummary>, ApplicationError> {
        let summaries = self.client.daily(days).await.map_err(Self::map_error)?;
        debug!(count = summaries.len(), "Retrieved daily aggregates");
        Ok(summaries)
    }
}

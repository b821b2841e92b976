//! `QueryApiPort` implementation over the query service's REST API

use application::error::ApplicationError;
use application::ports::{QueryApiPort, StationMeta};
use async_trait::async_trait;
use domain::entities::{DailySummary, Reading};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP client for the query service's dashboard API
#[derive(Debug, Clone)]
pub struct HttpQueryApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpQueryApi {
    /// Create a client for the query service at `base_url`
    ///
    /// The client-level timeout is a backstop; per-request budgets are
    /// the refresh coordinator's job.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApplicationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApplicationError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("{path}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApplicationError::ExternalService(format!(
                "{path}: HTTP {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApplicationError::Internal(format!("{path}: decode: {e}")))
    }
}

#[async_trait]
impl QueryApiPort for HttpQueryApi {
    #[instrument(skip(self))]
    async fn meta(&self) -> Result<StationMeta, ApplicationError> {
        self.get_json("/api/meta", &[]).await
    }

    #[instrument(skip(self))]
    async fn current(&self) -> Result<Reading, ApplicationError> {
        self.get_json("/api/live/current", &[]).await
    }

    #[instrument(skip(self))]
    async fn recent(&self, hours: u32, past: u32) -> Result<Vec<Reading>, ApplicationError> {
        let readings: Vec<Reading> = self
            .get_json(
                "/api/live/recent",
                &[("hours", hours.to_string()), ("past", past.to_string())],
            )
            .await?;
        debug!(count = readings.len(), "fetched recent window");
        Ok(readings)
    }

    #[instrument(skip(self))]
    async fn daily(&self, days: u32) -> Result<Vec<DailySummary>, ApplicationError> {
        self.get_json("/api/live/daily", &[("days", days.to_string())])
            .await
    }
}

//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use application::{
    error::ApplicationError,
    ports::{ForecastPort, ReadingStorePort},
};
use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use domain::entities::{DailySummary, Reading};
use presentation_http::{
    routes::create_router,
    state::{AppState, StationInfo},
};
use serde_json::Value;

fn reading_at(offset_hours: i64) -> Reading {
    let time = Utc::now() + Duration::hours(offset_hours);
    let mut reading = Reading::at(time, time.to_rfc3339());
    reading.air_temperature = Some(30.0 + offset_hours as f64);
    reading
}

/// Forecast stub serving a fixed hourly series around now
struct StubForecast {
    hourly_offsets: Vec<i64>,
    fail: bool,
    daily_days: Mutex<Option<u8>>,
}

impl StubForecast {
    fn new(hourly_offsets: Vec<i64>) -> Self {
        Self {
            hourly_offsets,
            fail: false,
            daily_days: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            hourly_offsets: Vec::new(),
            fail: true,
            daily_days: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ForecastPort for StubForecast {
    async fn current(&self) -> Result<Reading, ApplicationError> {
        if self.fail {
            return Err(ApplicationError::ExternalService("provider down".into()));
        }
        Ok(reading_at(0))
    }

    async fn hourly(&self) -> Result<Vec<Reading>, ApplicationError> {
        if self.fail {
            return Err(ApplicationError::ExternalService("provider down".into()));
        }
        Ok(self.hourly_offsets.iter().map(|&h| reading_at(h)).collect())
    }

    async fn daily(&self, days: u8) -> Result<Vec<DailySummary>, ApplicationError> {
        if self.fail {
            return Err(ApplicationError::ExternalService("provider down".into()));
        }
        *self.daily_days.lock().unwrap() = Some(days);
        let start = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        Ok((0..days)
            .map(|i| DailySummary {
                date: start + Duration::days(i64::from(i)),
                tmin: Some(25.0),
                tmax: Some(33.0),
                rain: Some(0.0),
            })
            .collect())
    }
}

/// Store stub recording the parameters it was queried with
#[derive(Default)]
struct StubStore {
    latest: Option<Reading>,
    range_readings: Vec<Reading>,
    next_span: Mutex<Option<(DateTime<Utc>, DateTime<Utc>)>>,
    summary_days: Mutex<Option<u32>>,
    range_span: Mutex<Option<(DateTime<Utc>, DateTime<Utc>)>>,
}

#[async_trait]
impl ReadingStorePort for StubStore {
    async fn latest_before(
        &self,
        _instant: DateTime<Utc>,
    ) -> Result<Option<Reading>, ApplicationError> {
        Ok(self.latest.clone())
    }

    async fn range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Reading>, ApplicationError> {
        *self.range_span.lock().unwrap() = Some((from, to));
        Ok(self.range_readings.clone())
    }

    async fn next_within(
        &self,
        after: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Reading>, ApplicationError> {
        *self.next_span.lock().unwrap() = Some((after, until));
        Ok(Vec::new())
    }

    async fn daily_summaries(&self, days: u32) -> Result<Vec<DailySummary>, ApplicationError> {
        *self.summary_days.lock().unwrap() = Some(days);
        Ok(Vec::new())
    }
}

fn server_with(forecast: Arc<StubForecast>, store: Option<Arc<StubStore>>) -> TestServer {
    let state = AppState {
        forecast: forecast as Arc<dyn ForecastPort>,
        store: store.map(|s| s as Arc<dyn ReadingStorePort>),
        station: StationInfo {
            place: "Bangkok".to_string(),
            tz: "Asia/Bangkok".to_string(),
        },
    };
    TestServer::new(create_router(state)).expect("test server")
}

fn server() -> TestServer {
    server_with(Arc::new(StubForecast::new(vec![-2, -1, 1, 2, 3])), None)
}

#[tokio::test]
async fn health_reports_ok() {
    let response = server().get("/api/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["ok"], Value::Bool(true));
    assert!(body["ts"].is_string());
}

#[tokio::test]
async fn meta_reports_station_identity_and_clock() {
    let before = Utc::now();
    let response = server().get("/api/meta").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["place"], "Bangkok");
    assert_eq!(body["tz"], "Asia/Bangkok");
    let now: DateTime<Utc> = body["now"].as_str().unwrap().parse().unwrap();
    assert!(now >= before && now <= Utc::now());
}

#[tokio::test]
async fn live_current_sets_provider_time_and_no_store() {
    let response = server().get("/api/live/current").await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );
    let provider_time = response
        .headers()
        .get("x-provider-time")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    let body: Value = response.json();
    assert_eq!(body["time_utc"].as_str().unwrap(), provider_time);
}

#[tokio::test]
async fn live_recent_windows_around_now() {
    // Samples at -2h, -1h, +1h, +2h, +3h; hours=2, past=1 keeps the last
    // past sample and the first future one.
    let response = server()
        .get("/api/live/recent")
        .add_query_param("hours", "2")
        .add_query_param("past", "1")
        .await;
    response.assert_status_ok();
    let body: Vec<Reading> = response.json();
    assert_eq!(body.len(), 2);
    assert!(body[0].time_utc < Utc::now());
    assert!(body[1].time_utc > Utc::now());
}

#[tokio::test]
async fn live_recent_tolerates_garbage_params() {
    let response = server()
        .get("/api/live/recent")
        .add_query_param("hours", "banana")
        .add_query_param("past", "-4")
        .await;
    response.assert_status_ok();
    let body: Vec<Reading> = response.json();
    // Defaults (hours=12, past=3) cover the whole five-sample series.
    assert_eq!(body.len(), 5);
}

#[tokio::test]
async fn live_recent_output_is_sorted() {
    let server = server_with(Arc::new(StubForecast::new(vec![3, -2, 1, -1, 2])), None);
    let response = server.get("/api/live/recent").await;
    response.assert_status_ok();
    let body: Vec<Reading> = response.json();
    assert!(body.windows(2).all(|w| w[0].time_utc <= w[1].time_utc));
}

#[tokio::test]
async fn live_daily_clamps_days() {
    let forecast = Arc::new(StubForecast::new(vec![]));
    let server = server_with(Arc::clone(&forecast), None);
    let response = server
        .get("/api/live/daily")
        .add_query_param("days", "99")
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );
    assert_eq!(*forecast.daily_days.lock().unwrap(), Some(14));
}

#[tokio::test]
async fn provider_failure_is_a_503_with_an_error_body() {
    let server = server_with(Arc::new(StubForecast::failing()), None);
    let response = server.get("/api/live/current").await;
    response.assert_status_service_unavailable();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("provider down"));
}

#[tokio::test]
async fn store_endpoints_answer_503_without_a_store() {
    let server = server();
    for path in [
        "/api/current",
        "/api/readings/recent",
        "/api/readings/window",
        "/api/readings/next",
        "/api/summary/daily",
        "/api/daily",
    ] {
        let response = server.get(path).await;
        response.assert_status_service_unavailable();
        let body: Value = response.json();
        assert!(body["error"].is_string(), "missing error body for {path}");
    }
}

#[tokio::test]
async fn current_returns_latest_logged_reading() {
    let store = Arc::new(StubStore {
        latest: Some(reading_at(-1)),
        ..Default::default()
    });
    let server = server_with(Arc::new(StubForecast::new(vec![])), Some(store));
    let response = server.get("/api/current").await;
    response.assert_status_ok();
    let body: Reading = response.json();
    assert_eq!(body.air_temperature, Some(29.0));
}

#[tokio::test]
async fn current_with_an_empty_store_is_a_not_found_error() {
    let server = server_with(
        Arc::new(StubForecast::new(vec![])),
        Some(Arc::new(StubStore::default())),
    );
    let response = server.get("/api/current").await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "no data");
}

#[tokio::test]
async fn readings_recent_queries_the_requested_span() {
    let store = Arc::new(StubStore::default());
    let server = server_with(Arc::new(StubForecast::new(vec![])), Some(Arc::clone(&store)));
    let response = server
        .get("/api/readings/recent")
        .add_query_param("hours", "24")
        .await;
    response.assert_status_ok();
    let (from, to) = store.range_span.lock().unwrap().expect("range queried");
    let span = to - from;
    assert!(span >= Duration::hours(24));
    assert!(span < Duration::hours(25));
}

#[tokio::test]
async fn readings_window_spans_past_and_future() {
    let store = Arc::new(StubStore::default());
    let server = server_with(Arc::new(StubForecast::new(vec![])), Some(Arc::clone(&store)));
    let response = server
        .get("/api/readings/window")
        .add_query_param("past", "6")
        .add_query_param("future", "3")
        .await;
    response.assert_status_ok();
    let (from, to) = store.range_span.lock().unwrap().expect("range queried");
    let now = Utc::now();
    assert!(from < now && to > now);
    assert!((to - from) >= Duration::hours(9));
}

#[tokio::test]
async fn readings_next_queries_a_clamped_time_bound() {
    let store = Arc::new(StubStore::default());
    let server = server_with(Arc::new(StubForecast::new(vec![])), Some(Arc::clone(&store)));
    let response = server
        .get("/api/readings/next")
        .add_query_param("hours", "500")
        .await;
    response.assert_status_ok();
    // hours=500 clamps to 48; the bound is a time span, not a row count.
    let (after, until) = store.next_span.lock().unwrap().expect("next queried");
    assert_eq!(until - after, Duration::hours(48));
    assert!(after <= Utc::now());
}

#[tokio::test]
async fn daily_alias_reaches_the_same_handler() {
    let store = Arc::new(StubStore::default());
    let server = server_with(Arc::new(StubForecast::new(vec![])), Some(Arc::clone(&store)));

    let response = server.get("/api/daily").await;
    response.assert_status_ok();
    assert_eq!(*store.summary_days.lock().unwrap(), Some(7));

    let response = server
        .get("/api/summary/daily")
        .add_query_param("days", "3")
        .await;
    response.assert_status_ok();
    assert_eq!(*store.summary_days.lock().unwrap(), Some(3));
}

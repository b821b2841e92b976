//! Provider-backed live handlers
//!
//! Every response here carries `Cache-Control: no-store`: the data is a
//! passthrough of the upstream forecast and must not be cached between the
//! provider and the dashboard.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use domain::series::select_window;

use crate::error::ApiError;
use crate::params::clamped;
use crate::state::AppState;

const NO_STORE: (&str, &str) = ("cache-control", "no-store");

/// Current conditions straight from the provider
///
/// `X-Provider-Time` carries the provider's observation instant so clients
/// can tell a stale observation from a stale proxy.
pub async fn current(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let reading = state.forecast.current().await?;
    let provider_time = reading.time_utc.to_rfc3339();
    Ok((
        [
            (NO_STORE.0, NO_STORE.1.to_string()),
            ("x-provider-time", provider_time),
        ],
        Json(reading),
    ))
}

/// Hourly series from the provider, windowed around now
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let hours = clamped(&query, "hours", 12, 1, 48);
    let past = clamped(&query, "past", 3, 0, hours);
    let series = state.forecast.hourly().await?;
    let window = select_window(series, Utc::now(), past as usize, hours as usize);
    Ok(([NO_STORE], Json(window.readings)))
}

/// Daily forecast aggregates from the provider
pub async fn daily(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let days = clamped(&query, "days", 7, 1, 14);
    let summaries = state.forecast.daily(u8::try_from(days).unwrap_or(7)).await?;
    Ok(([NO_STORE], Json(summaries)))
}

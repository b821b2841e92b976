//! Store-backed reading handlers
//!
//! All of these answer 503 when no reading store is configured; the live
//! endpoints keep working regardless.

use std::collections::HashMap;
use std::sync::Arc;

use application::ports::ReadingStorePort;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, Utc};
use domain::entities::{DailySummary, Reading};

use crate::error::ApiError;
use crate::params::clamped;
use crate::state::AppState;

fn store(state: &AppState) -> Result<&Arc<dyn ReadingStorePort>, ApiError> {
    state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("reading store not configured".to_string()))
}

/// Latest logged reading at or before now
pub async fn current(State(state): State<AppState>) -> Result<Json<Reading>, ApiError> {
    let reading = store(&state)?.latest_before(Utc::now()).await?;
    reading
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no data".to_string()))
}

/// Logged readings from the last `hours` hours
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let hours = clamped(&query, "hours", 12, 1, 168);
    let now = Utc::now();
    let from = now - Duration::hours(i64::from(hours));
    // The store range is half-open; nudge the upper bound so a reading
    // stamped exactly now is included.
    let readings = store(&state)?.range(from, now + Duration::seconds(1)).await?;
    Ok(Json(readings))
}

/// Logged readings spanning `past` hours back to `future` hours ahead
pub async fn window(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let past = clamped(&query, "past", 12, 0, 168);
    let future = clamped(&query, "future", 12, 0, 168);
    let now = Utc::now();
    let from = now - Duration::hours(i64::from(past));
    let to = now + Duration::hours(i64::from(future)) + Duration::seconds(1);
    let readings = store(&state)?.range(from, to).await?;
    Ok(Json(readings))
}

/// Logged readings from the coming `hours` hours, strictly after now
pub async fn next(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let hours = clamped(&query, "hours", 6, 1, 48);
    let now = Utc::now();
    let until = now + Duration::hours(i64::from(hours));
    let readings = store(&state)?.next_within(now, until).await?;
    Ok(Json(readings))
}

/// Per-local-date aggregates over the logged readings
pub async fn daily(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<Vec<DailySummary>>, ApiError> {
    let days = clamped(&query, "days", 7, 1, 14);
    let summaries = store(&state)?.daily_summaries(days).await?;
    Ok(Json(summaries))
}

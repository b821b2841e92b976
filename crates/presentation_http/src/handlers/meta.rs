//! Station metadata handler

use application::ports::StationMeta;
use axum::{Json, extract::State};
use chrono::Utc;

use crate::state::AppState;

/// Station identity plus the server clock
///
/// Clients use `now` as the pivot for windowing so that a skewed local
/// clock never moves the past/future divider.
pub async fn meta(State(state): State<AppState>) -> Json<StationMeta> {
    Json(StationMeta {
        place: state.station.place.clone(),
        tz: state.station.tz.clone(),
        now: Utc::now(),
    })
}

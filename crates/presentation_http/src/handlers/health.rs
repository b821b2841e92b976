//! Health check handler

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub ts: DateTime<Utc>,
}

/// Liveness check - is the server running?
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: Utc::now(),
    })
}

//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and station identity
        .route("/api/health", get(handlers::health::health))
        .route("/api/meta", get(handlers::meta::meta))
        // Logged readings (503 without a configured store)
        .route("/api/current", get(handlers::readings::current))
        .route("/api/readings/recent", get(handlers::readings::recent))
        .route("/api/readings/window", get(handlers::readings::window))
        .route("/api/readings/next", get(handlers::readings::next))
        .route("/api/summary/daily", get(handlers::readings::daily))
        .route("/api/daily", get(handlers::readings::daily))
        // Live provider passthrough
        .route("/api/live/current", get(handlers::live::current))
        .route("/api/live/recent", get(handlers::live::recent))
        .route("/api/live/daily", get(handlers::live::daily))
        // Attach state
        .with_state(state)
}

//! HTTP presentation layer - the Skylight query service
//!
//! Serves the dashboard API: station metadata, logged readings from the
//! optional store, and live readings proxied from the forecast provider.
//! All endpoints are GET-only JSON; numeric query parameters are parsed
//! leniently and clamped, never rejected.

pub mod error;
pub mod handlers;
pub mod params;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, StationInfo};

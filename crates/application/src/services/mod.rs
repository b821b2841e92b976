//! Application services

pub mod refresh_coordinator;

pub use refresh_coordinator::{FetchPlan, Freshness, RefreshCoordinator, RefreshOutcome};

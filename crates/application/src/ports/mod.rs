//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports define what the application layer needs from the outside world.
//! Infrastructure and integration crates provide the adapters.

pub mod bundle_cache;
pub mod forecast_port;
pub mod query_api_port;
pub mod reading_store;

pub use bundle_cache::BundleCachePort;
pub use forecast_port::ForecastPort;
pub use query_api_port::{QueryApiPort, StationMeta};
pub use reading_store::ReadingStorePort;

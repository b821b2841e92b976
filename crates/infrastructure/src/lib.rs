//! Infrastructure layer - Adapters and technical concerns
//!
//! Implements the application ports against real technology: the SQLite
//! reading store, the JSON-file durable cache, the HTTP query-api client,
//! plus configuration loading.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod store;

pub use adapters::{ForecastAdapter, HttpQueryApi};
pub use cache::JsonBundleCache;
pub use config::AppConfig;
pub use store::{ConnectionPool, SqliteReadingStore, create_pool};

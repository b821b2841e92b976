//! Open-Meteo provider integration
//!
//! Fetches forecast blocks from the Open-Meteo API and normalizes them
//! into flat domain readings and daily summaries. The client never
//! retries; retry policy belongs to its callers.

pub mod client;
pub mod models;

pub use client::{OpenMeteoClient, OpenMeteoConfig, ProviderError};

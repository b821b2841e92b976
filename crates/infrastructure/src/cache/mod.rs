//! Durable caches

mod json_bundle_cache;

pub use json_bundle_cache::JsonBundleCache;

//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `location`: station place name, coordinates, timezone
//! - `provider`: upstream forecast provider settings
//! - `store`: optional SQLite reading store
//! - `refresh`: dashboard refresh schedule and durable cache

mod location;
mod provider;
mod refresh;
mod server;
mod store;

use serde::{Deserialize, Serialize};

pub use location::LocationConfig;
pub use provider::ProviderConfig;
pub use refresh::RefreshConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Station location configuration
    #[serde(default)]
    pub location: LocationConfig,

    /// Forecast provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Reading store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Dashboard refresh configuration
    #[serde(default)]
    pub refresh: RefreshConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., SKYLIGHT_SERVER_PORT)
            .add_source(
                config::Environment::with_prefix("SKYLIGHT")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.location.place, "Bangkok");
        assert!(config.store.path.is_none());
    }

    #[test]
    fn app_config_deserialization() {
        let json = r#"{"server":{"port":8080}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn app_config_with_store_path() {
        let json = r#"{"store":{"path":"readings.db"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.store.path.as_deref(), Some("readings.db"));
        assert_eq!(config.store.max_connections, 5);
    }

    #[test]
    fn app_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("server"));
        assert!(json.contains("location"));
        assert!(json.contains("provider"));
    }

    #[test]
    fn refresh_section_deserializes_schedule() {
        let json = r#"{"refresh":{"schedule":{"timeouts_secs":[5,5],"backoff_base_ms":100}}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.refresh.schedule.timeouts_secs, vec![5, 5]);
        assert_eq!(config.refresh.schedule.backoff_base_ms, 100);
    }
}

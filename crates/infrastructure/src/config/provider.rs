//! Forecast provider configuration.

use serde::{Deserialize, Serialize};

/// Upstream forecast provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for the Open-Meteo API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string sent with provider requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("skylight/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("skylight/"));
    }

    #[test]
    fn provider_config_deserialize() {
        let json = r#"{"base_url":"http://localhost:9000","timeout_secs":5}"#;
        let config: ProviderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 5);
    }
}

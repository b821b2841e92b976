//! Reading store configuration.

use serde::{Deserialize, Serialize};

/// Optional SQLite reading store settings
///
/// When `path` is absent no store is opened and store-backed endpoints
/// answer 503.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`
    #[serde(default)]
    pub path: Option<String>,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: default_max_connections(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_config_default_has_no_path() {
        let config = StoreConfig::default();
        assert!(config.path.is_none());
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn store_config_deserialize() {
        let json = r#"{"path":":memory:","max_connections":2}"#;
        let config: StoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.path.as_deref(), Some(":memory:"));
        assert_eq!(config.max_connections, 2);
    }
}

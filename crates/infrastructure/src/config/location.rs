//! Station location configuration.

use domain::value_objects::Coordinates;
use serde::{Deserialize, Serialize};

/// Station location: place label, coordinates and IANA timezone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Human-readable place name
    #[serde(default = "default_place")]
    pub place: String,

    /// Latitude in degrees
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude in degrees
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA timezone identifier, also passed through to the provider
    #[serde(default = "default_tz")]
    pub tz: String,
}

fn default_place() -> String {
    "Bangkok".to_string()
}

const fn default_latitude() -> f64 {
    Coordinates::bangkok().latitude()
}

const fn default_longitude() -> f64 {
    Coordinates::bangkok().longitude()
}

fn default_tz() -> String {
    "Asia/Bangkok".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            place: default_place(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            tz: default_tz(),
        }
    }
}

impl LocationConfig {
    /// Validate the configured coordinates
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude, self.longitude).ok()
    }
}

//! Weather symbol derived from WMO weather codes
//!
//! See <https://open-meteo.com/en/docs> for the WMO code reference.

use serde::{Deserialize, Serialize};

/// Weather symbol derived from a WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSymbol {
    /// Clear sky (WMO 0)
    ClearSky,
    /// Mainly clear (WMO 1)
    MainlyClear,
    /// Partly cloudy (WMO 2)
    PartlyCloudy,
    /// Overcast (WMO 3)
    Overcast,
    /// Fog (WMO 45, 48)
    Fog,
    /// Drizzle (WMO 51-57)
    Drizzle,
    /// Rain (WMO 61-67, 80-82)
    Rain,
    /// Snow (WMO 71-77, 85, 86)
    Snow,
    /// Thunderstorm (WMO 95, 96, 99)
    Thunder,
    /// Unknown condition
    Unknown,
}

impl WeatherSymbol {
    /// Convert a WMO weather code to a symbol
    #[must_use]
    pub const fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 | 80..=82 => Self::Rain,
            71..=77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunder,
            _ => Self::Unknown,
        }
    }

    /// Stable code string carried in `Reading::symbol_code`
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ClearSky => "clear_sky",
            Self::MainlyClear => "mainly_clear",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Overcast => "cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunder => "thunder",
            Self::Unknown => "unknown",
        }
    }

    /// Emoji display hint carried in `Reading::symbol_emoji`
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::ClearSky => "☀️",
            Self::MainlyClear => "🌤️",
            Self::PartlyCloudy => "⛅",
            Self::Overcast => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle | Self::Rain => "🌧️",
            Self::Snow => "❄️",
            Self::Thunder => "⛈️",
            Self::Unknown => "❓",
        }
    }
}

impl std::fmt::Display for WeatherSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

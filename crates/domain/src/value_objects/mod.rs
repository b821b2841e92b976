//! Domain value objects

pub mod coordinates;
pub mod weather_symbol;

pub use coordinates::Coordinates;
pub use weather_symbol::WeatherSymbol;

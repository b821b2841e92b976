//! Terminal dashboard presentation
//!
//! Pure view-model rendering: every function here maps a `ViewModel` (plus
//! a unit and the current instant) to lines of text, with no terminal or
//! network coupling. The `skylight-dash` binary owns the I/O.

pub mod render;

pub use render::{SkyKind, TemperatureUnit, Theme};

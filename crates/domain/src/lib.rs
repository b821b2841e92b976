//! Domain layer for Skylight
//!
//! Contains the core weather records, value objects, the windowing algorithm
//! and domain errors. This layer has no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod series;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use series::{Window, select_window};
pub use value_objects::*;

//! Application layer - Use cases and orchestration
//!
//! Contains the refresh coordinator, the retry schedule, and the port
//! definitions that decouple the dashboard logic from transport and
//! storage adapters.

pub mod error;
pub mod ports;
pub mod schedule;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use schedule::AttemptSchedule;
pub use services::*;

//! Domain entities

pub mod daily_summary;
pub mod reading;
pub mod view_model;

pub use daily_summary::DailySummary;
pub use reading::Reading;
pub use view_model::ViewModel;

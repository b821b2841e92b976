//! Port adapters

mod forecast_adapter;
mod http_query_api;

pub use forecast_adapter::ForecastAdapter;
pub use http_query_api::HttpQueryApi;

//! HTTP request handlers

pub mod health;
pub mod live;
pub mod meta;
pub mod readings;

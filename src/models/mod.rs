//! Raw data records and service configuration.

pub mod catalog;
pub mod config;

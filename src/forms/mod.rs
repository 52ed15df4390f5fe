//! Validated request bodies.

pub mod api;

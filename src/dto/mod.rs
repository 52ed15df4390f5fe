//! Response DTOs with wire-stable field names.

pub mod package;

//! Domain entities and value objects.

pub mod combination;
pub mod coverage;
pub mod filter;
pub mod package;
pub mod types;

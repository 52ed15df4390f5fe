use serde::{Deserialize, Serialize};

use crate::domain::types::PriceCents;

/// How a filtered package list should be ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortingOption {
    /// Cheapest first.
    Price,
    /// Highest relevant coverage first.
    Coverage,
    #[default]
    None,
}

/// Which coverage axis the user cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoveragePreference {
    Live,
    Highlights,
    #[default]
    None,
}

/// User-chosen filter criteria; absent fields mean "no constraint on this
/// axis".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterOptions {
    pub sorting_option: SortingOption,
    pub preference: CoveragePreference,
    pub max_price: Option<PriceCents>,
}

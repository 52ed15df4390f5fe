use serde::{Deserialize, Serialize};

use crate::domain::package::StreamingPackage;
use crate::domain::types::{CoverageFraction, PriceCents};

/// A proposed subscription bundle: up to a handful of distinct packages plus
/// their combined price and union coverage.
///
/// Built fresh per request and returned to the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Member packages, ordered by ascending package id.
    pub packages: Vec<StreamingPackage>,
    pub total_price: PriceCents,
    pub total_live_coverage: CoverageFraction,
    pub total_highlight_coverage: CoverageFraction,
}

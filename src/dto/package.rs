//! Wire-stable response shapes.
//!
//! Field names are the contract the UI depends on
//! (`streamingPackageId`, `monthlyPriceCents`, `liveCoveragePercentage`,
//! ...); do not rename. Money is integer cents, coverage is a `[0, 1]`
//! float the caller multiplies by 100 for display.

use serde::{Deserialize, Serialize};

use crate::domain::combination::Combination;
use crate::domain::coverage::Coverage;
use crate::domain::package::StreamingPackage;

/// A package together with its coverage of the request's teams and
/// tournaments. Coverage is relative to the caller's requested set and is
/// recomputed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingPackageDto {
    pub streaming_package_id: i32,
    pub name: String,
    pub monthly_price_cents: i64,
    pub yearly_price_cents: i64,
    pub live_coverage_percentage: f64,
    pub highlights_coverage_percentage: f64,
}

impl StreamingPackageDto {
    pub fn from_package(package: &StreamingPackage, coverage: Coverage) -> Self {
        Self {
            streaming_package_id: package.id.get(),
            name: package.name.as_str().to_string(),
            monthly_price_cents: package.monthly_price_cents.get(),
            yearly_price_cents: package.yearly_price_cents.get(),
            live_coverage_percentage: coverage.live.get(),
            highlights_coverage_percentage: coverage.highlights.get(),
        }
    }
}

/// A selected package bundle with combined price and union coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationDto {
    pub packages: Vec<StreamingPackageDto>,
    pub total_price: i64,
    pub total_live_coverage: f64,
    pub total_highlight_coverage: f64,
}

impl CombinationDto {
    /// Builds the response shape from a domain combination plus the
    /// per-member coverage figures (in the same order as the members).
    pub fn from_combination(combination: &Combination, member_coverage: &[Coverage]) -> Self {
        let packages = combination
            .packages
            .iter()
            .zip(member_coverage)
            .map(|(package, coverage)| StreamingPackageDto::from_package(package, *coverage))
            .collect();
        Self {
            packages,
            total_price: combination.total_price.get(),
            total_live_coverage: combination.total_live_coverage.get(),
            total_highlight_coverage: combination.total_highlight_coverage.get(),
        }
    }
}

//! Compare: coverage of an explicitly named package set.
//!
//! Unlike `best-combination` nothing is optimized here; the caller picked
//! the packages and only wants their combined price and union coverage
//! against the requested teams and tournaments.

use crate::domain::combination::Combination;
use crate::domain::coverage::RequestedItems;
use crate::domain::types::{PackageId, PriceCents};
use crate::dto::package::CombinationDto;
use crate::repository::CatalogReader;
use crate::services::coverage::CoverageIndex;
use crate::services::{ServiceError, ServiceResult};

/// Core business logic for `POST /api/compare`.
///
/// Resolves every named package id (failing with `NotFound` if any is
/// missing from the catalog) and computes the set's union coverage.
pub fn compare<R: CatalogReader>(
    package_ids: &[PackageId],
    items: &RequestedItems,
    repo: &R,
) -> ServiceResult<CombinationDto> {
    let mut ids: Vec<PackageId> = Vec::with_capacity(package_ids.len());
    for id in package_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    ids.sort();

    let mut packages = Vec::with_capacity(ids.len());
    for id in &ids {
        match repo.package_by_id(*id)? {
            Some(package) => packages.push(package),
            None => return Err(ServiceError::NotFound),
        }
    }

    let index = CoverageIndex::build(items, repo)?;
    let union = index.set_fractions(&ids);
    let member_coverage: Vec<_> = ids.iter().map(|id| index.package_fractions(*id)).collect();
    let total_price = packages
        .iter()
        .fold(PriceCents::default(), |sum, package| {
            sum.saturating_add(package.monthly_price_cents)
        });

    let combination = Combination {
        packages,
        total_price,
        total_live_coverage: union.live,
        total_highlight_coverage: union.highlights,
    };
    Ok(CombinationDto::from_combination(&combination, &member_coverage))
}

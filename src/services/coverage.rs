//! Coverage model: which packages cover which requested items.
//!
//! A package covers a requested team or tournament live (resp. highlights)
//! when it has a live (resp. highlights) offer for at least one of that
//! item's games. Coverage of a package *set* is the union per requested
//! item, never a sum: redundant packages add no marginal coverage.

use std::collections::HashMap;

use crate::domain::coverage::{
    Coverage, CoverageMask, PackageCoverage, RequestedItem, RequestedItems,
};
use crate::domain::types::PackageId;
use crate::repository::CatalogReader;
use crate::services::ServiceResult;

/// Per-request lookup of item coverage, built once from the catalog's games
/// and offers and queried for every candidate package.
#[derive(Debug, Clone)]
pub struct CoverageIndex {
    item_count: usize,
    /// For each package, indexes of requested items it covers live.
    live: HashMap<PackageId, Vec<usize>>,
    /// Same for highlights.
    highlights: HashMap<PackageId, Vec<usize>>,
}

impl CoverageIndex {
    /// Walks every requested item's games and their offers once.
    pub fn build<R: CatalogReader>(items: &RequestedItems, repo: &R) -> ServiceResult<Self> {
        let mut live: HashMap<PackageId, Vec<usize>> = HashMap::new();
        let mut highlights: HashMap<PackageId, Vec<usize>> = HashMap::new();

        for (index, item) in items.iter() {
            let game_ids = match item {
                RequestedItem::Team(team) => repo.game_ids_by_team(team)?,
                RequestedItem::Tournament(tournament) => {
                    repo.game_ids_by_tournament(tournament)?
                }
            };
            for game_id in game_ids {
                for offer in repo.offers_for_game(game_id)? {
                    if offer.live {
                        push_unique(live.entry(offer.package_id).or_default(), index);
                    }
                    if offer.highlights {
                        push_unique(highlights.entry(offer.package_id).or_default(), index);
                    }
                }
            }
        }

        Ok(Self {
            item_count: items.len(),
            live,
            highlights,
        })
    }

    /// Coverage masks of a single package.
    pub fn package_coverage(&self, package_id: PackageId) -> PackageCoverage {
        let mut coverage = PackageCoverage {
            live: CoverageMask::empty(self.item_count),
            highlights: CoverageMask::empty(self.item_count),
        };
        if let Some(indexes) = self.live.get(&package_id) {
            for index in indexes {
                coverage.live.set(*index);
            }
        }
        if let Some(indexes) = self.highlights.get(&package_id) {
            for index in indexes {
                coverage.highlights.set(*index);
            }
        }
        coverage
    }

    /// Aggregate fractions of a single package.
    pub fn package_fractions(&self, package_id: PackageId) -> Coverage {
        self.package_coverage(package_id).fractions()
    }

    /// Union coverage of a package set: an item counts as covered when any
    /// member covers it.
    pub fn set_fractions(&self, package_ids: &[PackageId]) -> Coverage {
        let mut union = PackageCoverage {
            live: CoverageMask::empty(self.item_count),
            highlights: CoverageMask::empty(self.item_count),
        };
        for package_id in package_ids {
            let coverage = self.package_coverage(*package_id);
            union.live.union_with(&coverage.live);
            union.highlights.union_with(&coverage.highlights);
        }
        union.fractions()
    }
}

fn push_unique(indexes: &mut Vec<usize>, index: usize) {
    if !indexes.contains(&index) {
        indexes.push(index);
    }
}

//! Search: list every package relevant to the requested teams and
//! tournaments, with per-request coverage figures.

use crate::domain::coverage::{PackageCoverage, RequestedItems};
use crate::domain::package::StreamingPackage;
use crate::dto::package::StreamingPackageDto;
use crate::repository::CatalogReader;
use crate::services::coverage::CoverageIndex;
use crate::services::{ServiceError, ServiceResult};

/// A candidate package with its per-request coverage masks.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub package: StreamingPackage,
    pub coverage: PackageCoverage,
}

/// Fetches every package that covers at least one requested item.
///
/// Packages with zero relevant coverage are excluded: searching is not
/// "list everything", it is "list everything relevant". An empty requested
/// set is the one exception and keeps the whole catalog, with coverage
/// trivially zero. Fails with `NotFound` only when the catalog itself is
/// empty, never for an empty match list.
pub fn fetch_candidates<R: CatalogReader>(
    items: &RequestedItems,
    index: &CoverageIndex,
    repo: &R,
) -> ServiceResult<Vec<Candidate>> {
    if repo.is_empty() {
        return Err(ServiceError::NotFound);
    }

    let mut candidates = Vec::new();
    for package in repo.packages()? {
        let coverage = index.package_coverage(package.id);
        if items.is_empty() || coverage.is_relevant() {
            candidates.push(Candidate { package, coverage });
        }
    }
    Ok(candidates)
}

/// Core business logic for `POST /api/search`.
pub fn search<R: CatalogReader>(
    items: &RequestedItems,
    repo: &R,
) -> ServiceResult<Vec<StreamingPackageDto>> {
    let index = CoverageIndex::build(items, repo)?;
    let candidates = fetch_candidates(items, &index, repo)?;
    Ok(candidates
        .into_iter()
        .map(|candidate| {
            let fractions = candidate.coverage.fractions();
            StreamingPackageDto::from_package(&candidate.package, fractions)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TeamName, TournamentName};
    use crate::repository::csv::CsvCatalog;
    use crate::repository::test::{sample_game, sample_offer, sample_package};

    fn items(teams: &[&str], tournaments: &[&str]) -> RequestedItems {
        RequestedItems::new(
            teams.iter().map(|t| TeamName::new(*t).unwrap()).collect(),
            tournaments
                .iter()
                .map(|t| TournamentName::new(*t).unwrap())
                .collect(),
        )
    }

    fn catalog() -> CsvCatalog {
        CsvCatalog::from_parts(
            vec![
                sample_package(1, "Sky", 500),
                sample_package(2, "DAZN", 700),
                sample_package(3, "Irrelevant TV", 100),
            ],
            vec![
                sample_game(1, "Team A", "Team X", "Cup"),
                sample_game(2, "Team C", "Team D", "Other League"),
            ],
            vec![
                sample_offer(1, 1, true, false),
                sample_offer(1, 2, false, true),
                sample_offer(2, 3, true, true),
            ],
        )
    }

    #[test]
    fn search_excludes_packages_with_zero_relevant_coverage() {
        let repo = catalog();
        let result = search(&items(&["Team A"], &[]), &repo).unwrap();
        let ids: Vec<i32> = result.iter().map(|dto| dto.streaming_package_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(result[0].live_coverage_percentage, 1.0);
        assert_eq!(result[1].live_coverage_percentage, 0.0);
        assert_eq!(result[1].highlights_coverage_percentage, 1.0);
    }

    #[test]
    fn search_with_no_matches_returns_empty_list_not_error() {
        let repo = catalog();
        let result = search(&items(&["Unknown FC"], &[]), &repo).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn search_with_empty_request_lists_whole_catalog() {
        let repo = catalog();
        let result = search(&items(&[], &[]), &repo).unwrap();
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|dto| dto.live_coverage_percentage == 0.0));
    }

    #[test]
    fn empty_catalog_is_not_found() {
        let repo = CsvCatalog::from_parts(vec![], vec![], vec![]);
        let result = search(&items(&["Team A"], &[]), &repo);
        assert_eq!(result.unwrap_err(), ServiceError::NotFound);
    }
}

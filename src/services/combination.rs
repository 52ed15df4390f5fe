//! Combination optimizer: exhaustive search for the best small package
//! bundle.
//!
//! Subset sizes are capped (3 by default) and the candidate list is already
//! relevance-filtered to tens of packages, so enumerating every subset of
//! size `1..=max_size` is tractable and exact. Greedy set-cover is *not*
//! used: it is not optimal for union coverage. Dominated packages are
//! discarded up front, which never affects optimality.

use std::time::{Duration, Instant};

use crate::domain::combination::Combination;
use crate::domain::coverage::{CoverageMask, RequestedItems};
use crate::domain::types::{PackageId, PriceCents};
use crate::dto::package::CombinationDto;
use crate::models::config::OptimizerConfig;
use crate::repository::CatalogReader;
use crate::services::coverage::CoverageIndex;
use crate::services::search::{Candidate, fetch_candidates};
use crate::services::{ServiceError, ServiceResult};

/// Weights of the subset objective
/// `score = live_weight * liveUnion + highlights_weight * highlightsUnion`.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub live: f64,
    pub highlights: f64,
}

impl From<&OptimizerConfig> for ScoreWeights {
    fn from(config: &OptimizerConfig) -> Self {
        Self {
            live: config.live_weight,
            highlights: config.highlights_weight,
        }
    }
}

/// Request-level knobs after validation against the configured caps.
#[derive(Debug, Clone)]
pub struct OptimizerRequest {
    pub max_size: usize,
    pub max_price: Option<PriceCents>,
    /// Restrict the search to these packages (the client usually passes its
    /// current search result); `None` searches all relevant packages.
    pub restrict_to: Option<Vec<PackageId>>,
}

#[derive(Debug)]
struct BestSubset {
    indexes: Vec<usize>,
    ids: Vec<PackageId>,
    score: f64,
    price: PriceCents,
}

/// Core business logic for `POST /api/best-combination`.
///
/// Maximizes union coverage over all subsets of size `1..=max_size`,
/// subject to `sum(price) <= max_price` when given. Ties resolve to the
/// lower total price, then the smaller subset, then the smaller package-id
/// list, so results are deterministic.
pub fn best_combination<R: CatalogReader>(
    items: &RequestedItems,
    request: &OptimizerRequest,
    config: &OptimizerConfig,
    repo: &R,
) -> ServiceResult<CombinationDto> {
    let index = CoverageIndex::build(items, repo)?;
    let mut candidates = fetch_candidates(items, &index, repo)?;
    if let Some(restrict_to) = &request.restrict_to {
        candidates.retain(|candidate| restrict_to.contains(&candidate.package.id));
    }
    let candidates = prune_dominated(candidates);

    let weights = ScoreWeights::from(config);
    let deadline = Instant::now() + Duration::from_millis(config.timeout_ms);

    let mut search = SubsetSearch {
        candidates: &candidates,
        items,
        weights,
        max_size: request.max_size.max(1),
        max_price: request.max_price,
        deadline,
        best: None,
        timed_out: false,
    };
    search.run();

    let best = resolve_outcome(search.best.take(), search.timed_out, config.timeout_ms)?;
    let packages: Vec<_> = best
        .indexes
        .iter()
        .map(|i| candidates[*i].package.clone())
        .collect();
    let union = index.set_fractions(&best.ids);
    let member_coverage: Vec<_> = best
        .ids
        .iter()
        .map(|id| index.package_fractions(*id))
        .collect();
    let combination = Combination {
        packages,
        total_price: best.price,
        total_live_coverage: union.live,
        total_highlight_coverage: union.highlights,
    };
    Ok(CombinationDto::from_combination(&combination, &member_coverage))
}

/// Settles an enumeration run. An expired budget returns the best subset
/// found so far (logged), or fails with `Timeout` when none exists yet; a
/// completed run with no subset means the constraints are infeasible.
fn resolve_outcome(
    best: Option<BestSubset>,
    timed_out: bool,
    timeout_ms: u64,
) -> ServiceResult<BestSubset> {
    if timed_out {
        match &best {
            Some(_) => log::warn!(
                "combination search hit its {timeout_ms}ms budget; returning best candidate found so far"
            ),
            None => return Err(ServiceError::Timeout),
        }
    }
    best.ok_or(ServiceError::NoFeasibleCombination)
}

/// Drops packages dominated by another single package: same or worse
/// coverage on every requested item at an equal-or-higher price. Exact
/// coverage-and-price ties keep only the lower id.
fn prune_dominated(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let keep: Vec<bool> = candidates
        .iter()
        .map(|candidate| {
            !candidates.iter().any(|other| {
                if other.package.id == candidate.package.id {
                    return false;
                }
                let covers_no_less = other.coverage.live.is_superset(&candidate.coverage.live)
                    && other
                        .coverage
                        .highlights
                        .is_superset(&candidate.coverage.highlights);
                if !covers_no_less
                    || other.package.monthly_price_cents > candidate.package.monthly_price_cents
                {
                    return false;
                }
                let strictly_better = other.package.monthly_price_cents
                    < candidate.package.monthly_price_cents
                    || other.coverage != candidate.coverage;
                strictly_better || other.package.id < candidate.package.id
            })
        })
        .collect();
    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}

struct SubsetSearch<'a> {
    candidates: &'a [Candidate],
    items: &'a RequestedItems,
    weights: ScoreWeights,
    max_size: usize,
    max_price: Option<PriceCents>,
    deadline: Instant,
    best: Option<BestSubset>,
    timed_out: bool,
}

impl SubsetSearch<'_> {
    fn run(&mut self) {
        let mut chosen = Vec::with_capacity(self.max_size);
        let live = self.items.empty_mask();
        let highlights = self.items.empty_mask();
        self.recurse(0, &mut chosen, &live, &highlights, PriceCents::default());
    }

    fn recurse(
        &mut self,
        start: usize,
        chosen: &mut Vec<usize>,
        live: &CoverageMask,
        highlights: &CoverageMask,
        price: PriceCents,
    ) {
        if self.timed_out || chosen.len() == self.max_size {
            return;
        }
        if Instant::now() >= self.deadline {
            self.timed_out = true;
            return;
        }
        for index in start..self.candidates.len() {
            let candidate = &self.candidates[index];
            let subset_price = price.saturating_add(candidate.package.monthly_price_cents);
            if let Some(max_price) = self.max_price
                && subset_price > max_price
            {
                continue;
            }
            let mut subset_live = live.clone();
            let mut subset_highlights = highlights.clone();
            subset_live.union_with(&candidate.coverage.live);
            subset_highlights.union_with(&candidate.coverage.highlights);

            chosen.push(index);
            self.consider(chosen, &subset_live, &subset_highlights, subset_price);
            self.recurse(index + 1, chosen, &subset_live, &subset_highlights, subset_price);
            chosen.pop();
            if self.timed_out {
                return;
            }
        }
    }

    fn consider(
        &mut self,
        chosen: &[usize],
        live: &CoverageMask,
        highlights: &CoverageMask,
        price: PriceCents,
    ) {
        let score = self.weights.live * live.fraction().get()
            + self.weights.highlights * highlights.fraction().get();
        let ids: Vec<PackageId> = chosen
            .iter()
            .map(|i| self.candidates[*i].package.id)
            .collect();
        let better = match &self.best {
            None => true,
            Some(best) => {
                score > best.score
                    || (score == best.score
                        && (price < best.price
                            || (price == best.price
                                && (ids.len() < best.ids.len()
                                    || (ids.len() == best.ids.len() && ids < best.ids)))))
            }
        };
        if better {
            self.best = Some(BestSubset {
                indexes: chosen.to_vec(),
                ids,
                score,
                price,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{TeamName, TournamentName};
    use crate::repository::csv::CsvCatalog;
    use crate::repository::test::{sample_game, sample_offer, sample_package};

    fn items(teams: &[&str]) -> RequestedItems {
        RequestedItems::new(
            teams.iter().map(|t| TeamName::new(*t).unwrap()).collect(),
            Vec::<TournamentName>::new(),
        )
    }

    fn request(max_size: usize, max_price: Option<i64>) -> OptimizerRequest {
        OptimizerRequest {
            max_size,
            max_price: max_price.map(|p| PriceCents::new(p).unwrap()),
            restrict_to: None,
        }
    }

    /// Ten teams, one game each; each package carries the first `live_n`
    /// games live.
    fn catalog(package_specs: &[(i32, i64, usize)]) -> (CsvCatalog, RequestedItems) {
        let team_names: Vec<String> = (1..=10).map(|n| format!("Team {n}")).collect();
        let games = (1..=10)
            .map(|n| sample_game(n, &format!("Team {n}"), &format!("Opponent {n}"), "League"))
            .collect();
        let mut offers = Vec::new();
        for (id, _, live_n) in package_specs {
            for game in 1..=*live_n as i32 {
                offers.push(sample_offer(game, *id, true, false));
            }
        }
        let packages = package_specs
            .iter()
            .map(|(id, price, _)| sample_package(*id, &format!("Package {id}"), *price))
            .collect();
        let requested = items(&team_names.iter().map(String::as_str).collect::<Vec<_>>());
        (CsvCatalog::from_parts(packages, games, offers), requested)
    }

    #[test]
    fn single_package_scenario_picks_highest_live_coverage() {
        // live coverage 0.6 / 0.5 / 0.9
        let (repo, requested) = catalog(&[(1, 500, 6), (2, 700, 5), (3, 300, 9)]);
        let result = best_combination(
            &requested,
            &request(1, None),
            &OptimizerConfig::default(),
            &repo,
        )
        .unwrap();
        assert_eq!(result.packages.len(), 1);
        assert_eq!(result.packages[0].streaming_package_id, 3);
        assert_eq!(result.total_live_coverage, 0.9);
        assert_eq!(result.total_price, 300);
    }

    #[test]
    fn max_price_restricts_and_then_makes_infeasible() {
        let (repo, requested) = catalog(&[(1, 500, 6), (2, 700, 5), (3, 300, 9)]);
        let config = OptimizerConfig::default();

        let result =
            best_combination(&requested, &request(1, Some(400)), &config, &repo).unwrap();
        assert_eq!(result.packages[0].streaming_package_id, 3);
        assert!(result.total_price <= 400);

        let result = best_combination(&requested, &request(1, Some(200)), &config, &repo);
        assert_eq!(result.unwrap_err(), ServiceError::NoFeasibleCombination);
    }

    #[test]
    fn pairs_beat_singles_when_coverage_is_complementary() {
        // Packages 1 and 2 each cover half; together they cover everything
        // cheaper than the full package 3.
        let team_names: Vec<String> = (1..=10).map(|n| format!("Team {n}")).collect();
        let games = (1..=10)
            .map(|n| sample_game(n, &format!("Team {n}"), &format!("Opponent {n}"), "League"))
            .collect();
        let mut offers = Vec::new();
        for game in 1..=5 {
            offers.push(sample_offer(game, 1, true, false));
        }
        for game in 6..=10 {
            offers.push(sample_offer(game, 2, true, false));
        }
        for game in 1..=10 {
            offers.push(sample_offer(game, 3, true, false));
        }
        let repo = CsvCatalog::from_parts(
            vec![
                sample_package(1, "Half A", 300),
                sample_package(2, "Half B", 300),
                sample_package(3, "Everything", 2000),
            ],
            games,
            offers,
        );
        let requested = items(&team_names.iter().map(String::as_str).collect::<Vec<_>>());

        let result = best_combination(
            &requested,
            &request(3, None),
            &OptimizerConfig::default(),
            &repo,
        )
        .unwrap();
        let ids: Vec<i32> = result
            .packages
            .iter()
            .map(|p| p.streaming_package_id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(result.total_live_coverage, 1.0);
        assert_eq!(result.total_price, 600);
    }

    #[test]
    fn full_coverage_single_package_wins_over_larger_subsets() {
        // Package 3 covers everything alone at the lowest price; no pair may
        // outscore it and size breaks the tie against redundant supersets.
        let (repo, requested) = catalog(&[(1, 500, 10), (2, 700, 10), (3, 300, 10)]);
        let result = best_combination(
            &requested,
            &request(3, None),
            &OptimizerConfig::default(),
            &repo,
        )
        .unwrap();
        assert_eq!(result.packages.len(), 1);
        assert_eq!(result.packages[0].streaming_package_id, 3);
    }

    #[test]
    fn result_never_exceeds_max_size_or_max_price() {
        let (repo, requested) = catalog(&[(1, 500, 4), (2, 400, 5), (3, 300, 6), (4, 200, 2)]);
        let result = best_combination(
            &requested,
            &request(2, Some(800)),
            &OptimizerConfig::default(),
            &repo,
        )
        .unwrap();
        assert!(result.packages.len() <= 2);
        assert!(result.total_price <= 800);
    }

    #[test]
    fn dominated_packages_do_not_change_the_result() {
        // Package 2 covers a subset of package 3's items at a higher price.
        let (repo, requested) = catalog(&[(2, 700, 5), (3, 300, 9)]);
        let result = best_combination(
            &requested,
            &request(3, None),
            &OptimizerConfig::default(),
            &repo,
        )
        .unwrap();
        let ids: Vec<i32> = result
            .packages
            .iter()
            .map(|p| p.streaming_package_id)
            .collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn restriction_limits_the_candidate_pool() {
        let (repo, requested) = catalog(&[(1, 500, 6), (2, 700, 5), (3, 300, 9)]);
        let restricted = OptimizerRequest {
            max_size: 1,
            max_price: None,
            restrict_to: Some(vec![PackageId::new(1).unwrap(), PackageId::new(2).unwrap()]),
        };
        let result =
            best_combination(&requested, &restricted, &OptimizerConfig::default(), &repo).unwrap();
        assert_eq!(result.packages[0].streaming_package_id, 1);
    }

    #[test]
    fn zero_budget_times_out() {
        let (repo, requested) = catalog(&[(1, 500, 6), (2, 700, 5), (3, 300, 9)]);
        let config = OptimizerConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        let result = best_combination(&requested, &request(3, None), &config, &repo);
        assert_eq!(result.unwrap_err(), ServiceError::Timeout);
    }

    #[test]
    fn expired_budget_returns_best_subset_found_so_far() {
        let best = BestSubset {
            indexes: vec![0],
            ids: vec![PackageId::new(3).unwrap()],
            score: 0.9,
            price: PriceCents::new(300).unwrap(),
        };
        let resolved = resolve_outcome(Some(best), true, 2000).unwrap();
        assert_eq!(resolved.ids, vec![PackageId::new(3).unwrap()]);
        assert_eq!(resolved.price, PriceCents::new(300).unwrap());

        assert_eq!(
            resolve_outcome(None, true, 2000).unwrap_err(),
            ServiceError::Timeout
        );
        assert_eq!(
            resolve_outcome(None, false, 2000).unwrap_err(),
            ServiceError::NoFeasibleCombination
        );
    }

    #[test]
    fn empty_request_yields_cheapest_single_package() {
        // All scores are zero, so the price/size/id tie-break applies.
        let (repo, _) = catalog(&[(1, 500, 6), (2, 700, 5), (3, 300, 9)]);
        let requested = items(&[]);
        let result = best_combination(
            &requested,
            &request(3, None),
            &OptimizerConfig::default(),
            &repo,
        )
        .unwrap();
        assert_eq!(result.packages.len(), 1);
        assert_eq!(result.packages[0].streaming_package_id, 3);
        assert_eq!(result.total_live_coverage, 0.0);
    }
}

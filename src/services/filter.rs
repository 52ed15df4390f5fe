//! Filter & sort engine over package lists.
//!
//! Works on the wire DTOs so that a client-supplied list can be re-filtered
//! exactly as a freshly searched one. The input is never mutated; both sort
//! stages are stable, so equal keys keep their relative order and repeated
//! calls are deterministic.

use crate::domain::coverage::RequestedItems;
use crate::domain::filter::{CoveragePreference, FilterOptions, SortingOption};
use crate::dto::package::StreamingPackageDto;
use crate::repository::CatalogReader;
use crate::services::ServiceResult;
use crate::services::search::search;

/// Applies `options` to a package list and returns the new ordering.
///
/// Stages run in a fixed order: the `maxPrice` cut first, then the
/// `preference` ordering, then the `sortingOption` ordering. A `NONE` stage
/// leaves the order from the previous stage untouched.
pub fn filter(
    packages: &[StreamingPackageDto],
    options: &FilterOptions,
) -> Vec<StreamingPackageDto> {
    let mut result: Vec<StreamingPackageDto> = packages
        .iter()
        .filter(|pkg| match options.max_price {
            Some(max_price) => pkg.monthly_price_cents <= max_price.get(),
            None => true,
        })
        .cloned()
        .collect();

    match options.preference {
        CoveragePreference::Live => {
            result.sort_by(|a, b| {
                b.live_coverage_percentage
                    .total_cmp(&a.live_coverage_percentage)
            });
        }
        CoveragePreference::Highlights => {
            result.sort_by(|a, b| {
                b.highlights_coverage_percentage
                    .total_cmp(&a.highlights_coverage_percentage)
            });
        }
        CoveragePreference::None => {}
    }

    match options.sorting_option {
        SortingOption::Price => {
            result.sort_by_key(|pkg| pkg.monthly_price_cents);
        }
        SortingOption::Coverage => {
            // The relevant axis follows the preference; live is the default.
            match options.preference {
                CoveragePreference::Highlights => result.sort_by(|a, b| {
                    b.highlights_coverage_percentage
                        .total_cmp(&a.highlights_coverage_percentage)
                }),
                _ => result.sort_by(|a, b| {
                    b.live_coverage_percentage
                        .total_cmp(&a.live_coverage_percentage)
                }),
            }
        }
        SortingOption::None => {}
    }

    result
}

/// Core business logic for `POST /api/filter`: re-filters an explicit
/// package list when one is supplied, otherwise recomputes candidates for
/// the requested teams and tournaments first.
pub fn filter_request<R: CatalogReader>(
    packages: Option<Vec<StreamingPackageDto>>,
    items: &RequestedItems,
    options: &FilterOptions,
    repo: &R,
) -> ServiceResult<Vec<StreamingPackageDto>> {
    let packages = match packages {
        Some(packages) => packages,
        None => search(items, repo)?,
    };
    Ok(filter(&packages, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PriceCents;

    fn dto(id: i32, price: i64, live: f64, highlights: f64) -> StreamingPackageDto {
        StreamingPackageDto {
            streaming_package_id: id,
            name: format!("Package {id}"),
            monthly_price_cents: price,
            yearly_price_cents: price,
            live_coverage_percentage: live,
            highlights_coverage_percentage: highlights,
        }
    }

    fn sample_list() -> Vec<StreamingPackageDto> {
        vec![
            dto(1, 700, 0.4, 0.9),
            dto(2, 300, 0.8, 0.2),
            dto(3, 500, 0.8, 0.5),
        ]
    }

    #[test]
    fn price_sort_is_ascending() {
        let result = filter(
            &sample_list(),
            &FilterOptions {
                sorting_option: SortingOption::Price,
                ..Default::default()
            },
        );
        let prices: Vec<i64> = result.iter().map(|p| p.monthly_price_cents).collect();
        assert_eq!(prices, vec![300, 500, 700]);
    }

    #[test]
    fn max_price_keeps_at_most_threshold() {
        let options = FilterOptions {
            max_price: Some(PriceCents::new(500).unwrap()),
            ..Default::default()
        };
        let result = filter(&sample_list(), &options);
        assert!(result.iter().all(|p| p.monthly_price_cents <= 500));
        assert_eq!(result.len(), 2);

        // Dropping the constraint only adds packages back.
        let unconstrained = filter(&sample_list(), &FilterOptions::default());
        for pkg in &result {
            assert!(unconstrained.contains(pkg));
        }
    }

    #[test]
    fn coverage_sort_defaults_to_live_axis() {
        let result = filter(
            &sample_list(),
            &FilterOptions {
                sorting_option: SortingOption::Coverage,
                ..Default::default()
            },
        );
        let ids: Vec<i32> = result.iter().map(|p| p.streaming_package_id).collect();
        // Packages 2 and 3 tie on live coverage; stable sort keeps input
        // order between them.
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn highlights_preference_drives_coverage_sort() {
        let result = filter(
            &sample_list(),
            &FilterOptions {
                sorting_option: SortingOption::Coverage,
                preference: CoveragePreference::Highlights,
                ..Default::default()
            },
        );
        let ids: Vec<i32> = result.iter().map(|p| p.streaming_package_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn none_options_are_a_no_op() {
        let input = sample_list();
        let result = filter(&input, &FilterOptions::default());
        assert_eq!(result, input);
    }

    #[test]
    fn filter_is_idempotent() {
        let options = FilterOptions {
            sorting_option: SortingOption::Price,
            preference: CoveragePreference::Live,
            max_price: Some(PriceCents::new(700).unwrap()),
        };
        let once = filter(&sample_list(), &options);
        let twice = filter(&once, &options);
        assert_eq!(once, twice);
    }
}

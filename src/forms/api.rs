//! Validated request bodies for the `/api` endpoints.
//!
//! Serde enforces enum membership (`PRICE|COVERAGE|NONE`,
//! `LIVE|HIGHLIGHTS|NONE`) and field types; `validator` rules cover the
//! numeric bounds. Conversion into domain types rejects blank names and
//! non-positive ids, so malformed requests fail here, before any
//! computation.

use serde::Deserialize;
use validator::Validate;

use crate::domain::coverage::RequestedItems;
use crate::domain::filter::{CoveragePreference, FilterOptions, SortingOption};
use crate::domain::types::{
    CoverageFraction, PackageId, PriceCents, TeamName, TournamentName, TypeConstraintError,
};
use crate::dto::package::StreamingPackageDto;

fn parse_teams(raw: &[String]) -> Result<Vec<TeamName>, TypeConstraintError> {
    raw.iter().map(TeamName::new).collect()
}

fn parse_tournaments(raw: &[String]) -> Result<Vec<TournamentName>, TypeConstraintError> {
    raw.iter().map(TournamentName::new).collect()
}

/// Client-supplied package lists must satisfy the same bounds the service
/// itself produces: positive id, non-negative prices, coverage in `[0, 1]`.
fn validate_packages(packages: Option<&[StreamingPackageDto]>) -> Result<(), TypeConstraintError> {
    for pkg in packages.into_iter().flatten() {
        PackageId::new(pkg.streaming_package_id)?;
        PriceCents::new(pkg.monthly_price_cents)?;
        PriceCents::new(pkg.yearly_price_cents)?;
        CoverageFraction::new(pkg.live_coverage_percentage)?;
        CoverageFraction::new(pkg.highlights_coverage_percentage)?;
    }
    Ok(())
}

/// Body of `POST /api/search`.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub tournaments: Vec<String>,
}

impl SearchForm {
    /// The deduplicated requested item set.
    pub fn requested_items(&self) -> Result<RequestedItems, TypeConstraintError> {
        Ok(RequestedItems::new(
            parse_teams(&self.teams)?,
            parse_tournaments(&self.tournaments)?,
        ))
    }
}

/// Body of `POST /api/filter`. Either `packages` (an explicit list to
/// re-filter) or `teams`/`tournaments` (candidates recomputed server-side)
/// must be present.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterForm {
    pub packages: Option<Vec<StreamingPackageDto>>,
    pub teams: Option<Vec<String>>,
    pub tournaments: Option<Vec<String>>,
    pub sorting_option: Option<SortingOption>,
    pub preference: Option<CoveragePreference>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,
}

impl FilterForm {
    /// Rejects bodies that name neither an explicit package list nor any
    /// teams/tournaments to recompute one from.
    pub fn ensure_sources(&self) -> Result<(), TypeConstraintError> {
        if self.packages.is_none() && self.teams.is_none() && self.tournaments.is_none() {
            return Err(TypeConstraintError::InvalidValue(
                "either packages or teams/tournaments must be supplied".to_string(),
            ));
        }
        Ok(())
    }

    /// Bounds-checks a client-supplied package list before it is re-filtered.
    pub fn ensure_packages(&self) -> Result<(), TypeConstraintError> {
        validate_packages(self.packages.as_deref())
    }

    pub fn requested_items(&self) -> Result<RequestedItems, TypeConstraintError> {
        Ok(RequestedItems::new(
            parse_teams(self.teams.as_deref().unwrap_or_default())?,
            parse_tournaments(self.tournaments.as_deref().unwrap_or_default())?,
        ))
    }

    pub fn options(&self) -> Result<FilterOptions, TypeConstraintError> {
        Ok(FilterOptions {
            sorting_option: self.sorting_option.unwrap_or_default(),
            preference: self.preference.unwrap_or_default(),
            max_price: self.max_price.map(PriceCents::new).transpose()?,
        })
    }
}

/// Body of `POST /api/compare`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompareForm {
    #[validate(length(min = 1))]
    pub package_ids: Vec<i32>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub tournaments: Vec<String>,
    /// Accepted for contract compatibility; the response always carries
    /// both coverage axes.
    pub preference: Option<CoveragePreference>,
}

impl CompareForm {
    pub fn package_ids(&self) -> Result<Vec<PackageId>, TypeConstraintError> {
        self.package_ids.iter().map(|id| PackageId::new(*id)).collect()
    }

    pub fn requested_items(&self) -> Result<RequestedItems, TypeConstraintError> {
        Ok(RequestedItems::new(
            parse_teams(&self.teams)?,
            parse_tournaments(&self.tournaments)?,
        ))
    }
}

/// Body of `POST /api/best-combination`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BestCombinationForm {
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub tournaments: Vec<String>,
    /// Restrict the search to these packages, e.g. the current search
    /// result shown in the client.
    pub packages: Option<Vec<StreamingPackageDto>>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,
    #[validate(range(min = 1))]
    pub max_size: Option<usize>,
}

impl BestCombinationForm {
    /// Bounds-checks a client-supplied package list before ids are taken
    /// from it.
    pub fn ensure_packages(&self) -> Result<(), TypeConstraintError> {
        validate_packages(self.packages.as_deref())
    }

    pub fn requested_items(&self) -> Result<RequestedItems, TypeConstraintError> {
        Ok(RequestedItems::new(
            parse_teams(&self.teams)?,
            parse_tournaments(&self.tournaments)?,
        ))
    }

    pub fn max_price(&self) -> Result<Option<PriceCents>, TypeConstraintError> {
        self.max_price.map(PriceCents::new).transpose()
    }

    pub fn restrict_to(&self) -> Result<Option<Vec<PackageId>>, TypeConstraintError> {
        self.packages
            .as_ref()
            .map(|packages| {
                packages
                    .iter()
                    .map(|pkg| PackageId::new(pkg.streaming_package_id))
                    .collect()
            })
            .transpose()
    }
}

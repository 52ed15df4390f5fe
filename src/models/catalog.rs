//! Raw catalog records as they appear in the CSV export.
//!
//! These structs mirror the files column for column; conversion into domain
//! entities validates every field and is the only way records enter the rest
//! of the system.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::domain::package::{Game, StreamingOffer, StreamingPackage};
use crate::domain::types::{
    GameId, PackageId, PackageName, PriceCents, TeamName, TournamentName, TypeConstraintError,
};

const STARTS_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Row of `bc_game.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub id: i32,
    pub team_home: String,
    pub team_away: String,
    pub starts_at: String,
    pub tournament_name: String,
}

/// Row of `bc_streaming_offer.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferRecord {
    pub game_id: i32,
    pub streaming_package_id: i32,
    #[serde(deserialize_with = "flag_from_csv")]
    pub live: bool,
    #[serde(deserialize_with = "flag_from_csv")]
    pub highlights: bool,
}

/// Row of `bc_streaming_package.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageRecord {
    pub id: i32,
    pub name: String,
    /// Empty in the export for free packages.
    pub monthly_price_cents: Option<i64>,
    pub monthly_price_yearly_subscription_in_cents: Option<i64>,
}

/// The export writes booleans as `1`/`0`; accept `true`/`false` as well.
fn flag_from_csv<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean flag: {other}"
        ))),
    }
}

impl TryFrom<GameRecord> for Game {
    type Error = TypeConstraintError;

    fn try_from(record: GameRecord) -> Result<Self, Self::Error> {
        let starts_at = NaiveDateTime::parse_from_str(&record.starts_at, STARTS_AT_FORMAT)
            .map_err(|e| {
                TypeConstraintError::InvalidValue(format!(
                    "game {}: bad starts_at '{}': {e}",
                    record.id, record.starts_at
                ))
            })?;
        Ok(Game {
            id: GameId::new(record.id)?,
            home_team: TeamName::new(record.team_home)?,
            away_team: TeamName::new(record.team_away)?,
            starts_at,
            tournament: TournamentName::new(record.tournament_name)?,
        })
    }
}

impl TryFrom<OfferRecord> for StreamingOffer {
    type Error = TypeConstraintError;

    fn try_from(record: OfferRecord) -> Result<Self, Self::Error> {
        Ok(StreamingOffer {
            game_id: GameId::new(record.game_id)?,
            package_id: PackageId::new(record.streaming_package_id)?,
            live: record.live,
            highlights: record.highlights,
        })
    }
}

impl TryFrom<PackageRecord> for StreamingPackage {
    type Error = TypeConstraintError;

    fn try_from(record: PackageRecord) -> Result<Self, Self::Error> {
        Ok(StreamingPackage {
            id: PackageId::new(record.id)?,
            name: PackageName::new(record.name)?,
            monthly_price_cents: PriceCents::new(record.monthly_price_cents.unwrap_or(0))?,
            yearly_price_cents: PriceCents::new(
                record.monthly_price_yearly_subscription_in_cents.unwrap_or(0),
            )?,
        })
    }
}

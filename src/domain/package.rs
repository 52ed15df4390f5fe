use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{GameId, PackageId, PackageName, PriceCents, TeamName, TournamentName};

/// A streaming package from the catalog.
///
/// Immutable once loaded; services only hand out references or derived
/// copies, never mutated catalog entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingPackage {
    pub id: PackageId,
    pub name: PackageName,
    pub monthly_price_cents: PriceCents,
    /// Monthly price under a yearly subscription.
    pub yearly_price_cents: PriceCents,
}

/// A scheduled game between two teams within a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub home_team: TeamName,
    pub away_team: TeamName,
    pub starts_at: NaiveDateTime,
    pub tournament: TournamentName,
}

impl Game {
    /// Both participants of the game.
    pub fn teams(&self) -> [&TeamName; 2] {
        [&self.home_team, &self.away_team]
    }
}

/// What a package offers for one game: live transmission, highlights, both
/// or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingOffer {
    pub game_id: GameId,
    pub package_id: PackageId,
    pub live: bool,
    pub highlights: bool,
}

//! CSV-backed catalog snapshot.
//!
//! Loads the three catalog export files once, validates every record into
//! domain types and builds the lookup indexes the coverage model needs.
//! The loaded snapshot is immutable and cheap to share behind an `Arc`.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::package::{Game, StreamingOffer, StreamingPackage};
use crate::domain::types::{GameId, PackageId, TeamName, TournamentName};
use crate::models::catalog::{GameRecord, OfferRecord, PackageRecord};
use crate::repository::{CatalogReader, RepositoryError, RepositoryResult};

pub const GAMES_FILE: &str = "bc_game.csv";
pub const OFFERS_FILE: &str = "bc_streaming_offer.csv";
pub const PACKAGES_FILE: &str = "bc_streaming_package.csv";

/// Immutable in-memory catalog built from the CSV export.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    packages: Vec<StreamingPackage>,
    packages_by_id: HashMap<PackageId, usize>,
    games_by_id: HashMap<GameId, Game>,
    game_ids_by_team: HashMap<TeamName, Vec<GameId>>,
    game_ids_by_tournament: HashMap<TournamentName, Vec<GameId>>,
    offers_by_game: HashMap<GameId, Vec<StreamingOffer>>,
}

impl CsvCatalog {
    /// Loads and indexes the catalog from `data_dir`.
    ///
    /// Offers referencing unknown games or packages are dropped with a
    /// warning; malformed records fail the load.
    pub fn load(data_dir: &Path) -> RepositoryResult<Self> {
        let games = read_records::<GameRecord, Game>(&data_dir.join(GAMES_FILE))?;
        let packages = read_records::<PackageRecord, StreamingPackage>(
            &data_dir.join(PACKAGES_FILE),
        )?;
        let offers = read_records::<OfferRecord, StreamingOffer>(&data_dir.join(OFFERS_FILE))?;
        Ok(Self::from_parts(packages, games, offers))
    }

    /// Builds the indexed snapshot from already-validated entities.
    pub fn from_parts(
        mut packages: Vec<StreamingPackage>,
        games: Vec<Game>,
        offers: Vec<StreamingOffer>,
    ) -> Self {
        packages.sort_by_key(|pkg| pkg.id);
        packages.dedup_by_key(|pkg| pkg.id);
        let packages_by_id = packages
            .iter()
            .enumerate()
            .map(|(index, pkg)| (pkg.id, index))
            .collect();

        let mut games_by_id = HashMap::new();
        let mut game_ids_by_team: HashMap<TeamName, Vec<GameId>> = HashMap::new();
        let mut game_ids_by_tournament: HashMap<TournamentName, Vec<GameId>> = HashMap::new();
        for game in games {
            for team in game.teams() {
                game_ids_by_team.entry(team.clone()).or_default().push(game.id);
            }
            game_ids_by_tournament
                .entry(game.tournament.clone())
                .or_default()
                .push(game.id);
            games_by_id.insert(game.id, game);
        }

        let mut catalog = Self {
            packages,
            packages_by_id,
            games_by_id,
            game_ids_by_team,
            game_ids_by_tournament,
            offers_by_game: HashMap::new(),
        };

        for offer in offers {
            if !catalog.games_by_id.contains_key(&offer.game_id) {
                log::warn!("offer references unknown game {}; skipping", offer.game_id);
                continue;
            }
            if !catalog.packages_by_id.contains_key(&offer.package_id) {
                log::warn!(
                    "offer references unknown package {}; skipping",
                    offer.package_id
                );
                continue;
            }
            catalog
                .offers_by_game
                .entry(offer.game_id)
                .or_default()
                .push(offer);
        }

        catalog
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn game_count(&self) -> usize {
        self.games_by_id.len()
    }
}

fn read_records<R, T>(path: &Path) -> RepositoryResult<Vec<T>>
where
    R: serde::de::DeserializeOwned,
    T: TryFrom<R>,
    RepositoryError: From<<T as TryFrom<R>>::Error>,
{
    let mut reader = ::csv::ReaderBuilder::new().trim(::csv::Trim::All).from_path(path)?;
    let mut entities = Vec::new();
    for record in reader.deserialize::<R>() {
        entities.push(T::try_from(record?)?);
    }
    Ok(entities)
}

impl CatalogReader for CsvCatalog {
    fn packages(&self) -> RepositoryResult<Vec<StreamingPackage>> {
        Ok(self.packages.clone())
    }

    fn package_by_id(&self, id: PackageId) -> RepositoryResult<Option<StreamingPackage>> {
        Ok(self
            .packages_by_id
            .get(&id)
            .map(|index| self.packages[*index].clone()))
    }

    fn game_ids_by_team(&self, team: &TeamName) -> RepositoryResult<Vec<GameId>> {
        Ok(self.game_ids_by_team.get(team).cloned().unwrap_or_default())
    }

    fn game_ids_by_tournament(&self, tournament: &TournamentName) -> RepositoryResult<Vec<GameId>> {
        Ok(self
            .game_ids_by_tournament
            .get(tournament)
            .cloned()
            .unwrap_or_default())
    }

    fn offers_for_game(&self, game_id: GameId) -> RepositoryResult<Vec<StreamingOffer>> {
        Ok(self.offers_by_game.get(&game_id).cloned().unwrap_or_default())
    }

    fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

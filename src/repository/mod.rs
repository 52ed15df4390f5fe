//! Catalog access: an immutable snapshot of packages, games and offers.
//!
//! The snapshot is loaded once at startup and shared read-only across
//! request handlers; no component mutates catalog entities after load.

use thiserror::Error;

use crate::domain::package::{StreamingOffer, StreamingPackage};
use crate::domain::types::{GameId, PackageId, TeamName, TournamentName};

pub mod csv;

/// Errors produced while loading or reading the catalog.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("validation error: {0}")]
    Validation(String),
    /// The underlying catalog holds no packages at all.
    #[error("catalog is empty or unavailable")]
    EmptyCatalog,
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only operations over the catalog snapshot.
pub trait CatalogReader {
    /// All packages in the snapshot, ordered by ascending id.
    fn packages(&self) -> RepositoryResult<Vec<StreamingPackage>>;
    /// Retrieve a package by its identifier.
    fn package_by_id(&self, id: PackageId) -> RepositoryResult<Option<StreamingPackage>>;
    /// Identifiers of all games a team takes part in.
    fn game_ids_by_team(&self, team: &TeamName) -> RepositoryResult<Vec<GameId>>;
    /// Identifiers of all games belonging to a tournament.
    fn game_ids_by_tournament(&self, tournament: &TournamentName) -> RepositoryResult<Vec<GameId>>;
    /// Streaming offers available for a game.
    fn offers_for_game(&self, game_id: GameId) -> RepositoryResult<Vec<StreamingOffer>>;
    /// Whether the snapshot holds no packages.
    fn is_empty(&self) -> bool;
}

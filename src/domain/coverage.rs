//! Coverage primitives: the requested item set and per-package bitsets.
//!
//! All coverage figures are relative to one request's teams and tournaments.
//! A `CoverageMask` records, per requested item, whether a package (or a set
//! of packages, via union) covers it; fractions are derived by counting set
//! bits against the number of requested items.

use serde::{Deserialize, Serialize};

use crate::domain::types::{CoverageFraction, TeamName, TournamentName};

/// One entry of a request's coverage target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestedItem {
    Team(TeamName),
    Tournament(TournamentName),
}

/// The deduplicated, order-preserving set of teams and tournaments a request
/// asks to cover. All coverage math indexes into this list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestedItems {
    items: Vec<RequestedItem>,
}

impl RequestedItems {
    /// Builds the item list, collapsing duplicates while preserving the
    /// first occurrence order.
    pub fn new(teams: Vec<TeamName>, tournaments: Vec<TournamentName>) -> Self {
        let mut items = Vec::with_capacity(teams.len() + tournaments.len());
        for team in teams {
            let item = RequestedItem::Team(team);
            if !items.contains(&item) {
                items.push(item);
            }
        }
        for tournament in tournaments {
            let item = RequestedItem::Tournament(tournament);
            if !items.contains(&item) {
                items.push(item);
            }
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &RequestedItem)> {
        self.items.iter().enumerate()
    }

    /// An all-zero mask sized for this item list.
    pub fn empty_mask(&self) -> CoverageMask {
        CoverageMask::empty(self.items.len())
    }
}

/// Bitset over a request's item list; one bit per requested item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageMask {
    bits: Vec<u64>,
    len: usize,
}

impl CoverageMask {
    /// A mask of `len` unset bits.
    pub fn empty(len: usize) -> Self {
        Self {
            bits: vec![0; len.div_ceil(64)],
            len,
        }
    }

    /// Marks the item at `index` as covered.
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.bits[index / 64] |= 1 << (index % 64);
    }

    /// Whether the item at `index` is covered.
    pub fn contains(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.bits[index / 64] & (1 << (index % 64)) != 0
    }

    /// Folds `other` into `self`; an item counts as covered when either
    /// mask covers it.
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.len, other.len);
        for (word, other_word) in self.bits.iter_mut().zip(&other.bits) {
            *word |= other_word;
        }
    }

    /// Whether every item covered by `other` is also covered by `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        debug_assert_eq!(self.len, other.len);
        self.bits
            .iter()
            .zip(&other.bits)
            .all(|(word, other_word)| word & other_word == *other_word)
    }

    /// Number of covered items.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Whether no item is covered.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|word| *word == 0)
    }

    /// Covered items as a fraction of the request's item count.
    pub fn fraction(&self) -> CoverageFraction {
        CoverageFraction::ratio(self.count(), self.len)
    }
}

/// Live and highlights coverage of a package or package set, relative to
/// one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub live: CoverageFraction,
    pub highlights: CoverageFraction,
}

/// A package's coverage masks for one request, kept alongside its index in
/// the candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageCoverage {
    pub live: CoverageMask,
    pub highlights: CoverageMask,
}

impl PackageCoverage {
    /// Whether the package covers at least one requested item on either axis.
    pub fn is_relevant(&self) -> bool {
        !self.live.is_empty() || !self.highlights.is_empty()
    }

    /// Aggregate fractions over the requested item list.
    pub fn fractions(&self) -> Coverage {
        Coverage {
            live: self.live.fraction(),
            highlights: self.highlights.fraction(),
        }
    }
}

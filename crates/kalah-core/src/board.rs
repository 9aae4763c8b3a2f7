//! Board representation and pit geometry.
//!
//! This module contains:
//! - Geometry constants (houses per side, initial seeds, store spacing)
//! - The `Board` pit/seed mapping with bounds-checked access
//! - The opposite-house mirror used by the capture rule
//! - End-of-game sweep of a side's houses into its store
//!
//! Pits are identified by 1-based ids laid out in sow order: Player 1's
//! houses are 1-6, Player 1's store is 7, Player 2's houses are 8-13 and
//! Player 2's store is 14.

use crate::game::GameError;
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Pit identifier (1-based, 1..=PIT_COUNT)
pub type PitId = u8;

/// Number of houses on each player's side
pub const HOUSES_PER_SIDE: u8 = 6;

/// Seeds placed in each house when a game starts
pub const SEEDS_PER_HOUSE: u32 = 6;

/// Distance from a side's first house to its store. Each store sits
/// immediately after its side's houses, so store ids are multiples of this.
pub const STORE_SPACING: u8 = HOUSES_PER_SIDE + 1;

/// Total number of pits on the board (houses + stores for both sides)
pub const PIT_COUNT: u8 = 2 * STORE_SPACING;

/// The Kalah board: an ordered mapping from pit id to seed count.
///
/// Seed counts only move between pits; outside the atomic transfer of a
/// capture or sweep, the board total stays at
/// `2 * HOUSES_PER_SIDE * SEEDS_PER_HOUSE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Seed counts indexed by pit id minus one
    pits: [u32; PIT_COUNT as usize],
}

impl Board {
    /// Create the starting board: every house seeded, both stores empty
    pub fn new() -> Self {
        let mut pits = [SEEDS_PER_HOUSE; PIT_COUNT as usize];
        pits[Player::One.store() as usize - 1] = 0;
        pits[Player::Two.store() as usize - 1] = 0;
        Self { pits }
    }

    /// Map a pit id to its array slot, rejecting ids outside the board
    fn slot(pit: PitId) -> Result<usize, GameError> {
        if (1..=PIT_COUNT).contains(&pit) {
            Ok(pit as usize - 1)
        } else {
            Err(GameError::InvalidPit { pit })
        }
    }

    /// Seed count at a pit
    pub fn seeds(&self, pit: PitId) -> Result<u32, GameError> {
        Ok(self.pits[Self::slot(pit)?])
    }

    /// Overwrite the seed count at a pit
    pub fn set_seeds(&mut self, pit: PitId, count: u32) -> Result<(), GameError> {
        self.pits[Self::slot(pit)?] = count;
        Ok(())
    }

    /// Drop a single seed into a pit
    pub(crate) fn add_seed(&mut self, pit: PitId) -> Result<(), GameError> {
        self.pits[Self::slot(pit)?] += 1;
        Ok(())
    }

    /// Pick up every seed from a pit, leaving it empty
    pub(crate) fn take_seeds(&mut self, pit: PitId) -> Result<u32, GameError> {
        let slot = Self::slot(pit)?;
        let seeds = self.pits[slot];
        self.pits[slot] = 0;
        Ok(seeds)
    }

    /// Whether a pit id is one of the two stores
    pub fn is_store(pit: PitId) -> bool {
        pit % STORE_SPACING == 0
    }

    /// The mirrored house on the other side of the board: the opponent's
    /// house at the same offset from their first house. Not defined for
    /// stores, which have no mirror.
    pub fn opposite(pit: PitId) -> Result<PitId, GameError> {
        Self::slot(pit)?;
        if Self::is_store(pit) {
            return Err(GameError::InvalidPit { pit });
        }
        if pit < STORE_SPACING {
            Ok(pit + STORE_SPACING)
        } else {
            Ok(pit - STORE_SPACING)
        }
    }

    /// Total seeds across a player's houses (store excluded)
    pub fn house_sum(&self, player: Player) -> u32 {
        player
            .house_range()
            .map(|pit| self.pits[pit as usize - 1])
            .sum()
    }

    /// Seeds in a player's store
    pub fn store_seeds(&self, player: Player) -> u32 {
        self.pits[player.store() as usize - 1]
    }

    /// Total seeds on the whole board, stores included
    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().sum()
    }

    /// Move every remaining house seed on a player's side into that
    /// player's store. Returns the number of seeds swept.
    pub(crate) fn sweep(&mut self, player: Player) -> u32 {
        let mut swept = 0;
        for pit in player.house_range() {
            let slot = pit as usize - 1;
            swept += self.pits[slot];
            self.pits[slot] = 0;
        }
        self.pits[player.store() as usize - 1] += swept;
        swept
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

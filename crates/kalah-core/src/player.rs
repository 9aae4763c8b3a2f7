//! Player identity and side geometry.
//!
//! Exactly two players sit at a Kalah board. Each player's side is fully
//! derived from their number: the first house, the store id and the house
//! range are pure functions of the identity, so no per-player state is
//! stored anywhere.

use crate::board::{PitId, STORE_SPACING};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// One of the two sides of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Numeric identity (1 or 2)
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// The first house on this player's side
    pub fn first_house(&self) -> PitId {
        match self {
            Player::One => 1,
            Player::Two => STORE_SPACING + 1,
        }
    }

    /// This player's store, sitting immediately after their houses in
    /// sow order
    pub fn store(&self) -> PitId {
        self.number() * STORE_SPACING
    }

    /// Half-open range of this player's houses: `[first_house, store)`
    pub fn house_range(&self) -> Range<PitId> {
        self.first_house()..self.store()
    }

    /// Whether a pit is a house on this player's side
    pub fn owns_house(&self, pit: PitId) -> bool {
        self.house_range().contains(&pit)
    }

    /// The opposing player
    pub fn other(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_geometry() {
        assert_eq!(Player::One.first_house(), 1);
        assert_eq!(Player::One.store(), 7);
        assert_eq!(Player::Two.first_house(), 8);
        assert_eq!(Player::Two.store(), 14);
    }

    #[test]
    fn test_house_range_excludes_store() {
        let range: Vec<PitId> = Player::One.house_range().collect();
        assert_eq!(range, vec![1, 2, 3, 4, 5, 6]);

        let range: Vec<PitId> = Player::Two.house_range().collect();
        assert_eq!(range, vec![8, 9, 10, 11, 12, 13]);
    }

    #[test]
    fn test_owns_house() {
        assert!(Player::One.owns_house(1));
        assert!(Player::One.owns_house(6));
        assert!(!Player::One.owns_house(7));
        assert!(!Player::One.owns_house(8));

        assert!(Player::Two.owns_house(8));
        assert!(Player::Two.owns_house(13));
        assert!(!Player::Two.owns_house(14));
        assert!(!Player::Two.owns_house(6));
    }

    #[test]
    fn test_other() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::One.to_string(), "player 1");
        assert_eq!(Player::Two.to_string(), "player 2");
    }
}

//! Core game state machine.
//!
//! This module contains the `GameState` struct and the move engine: move
//! validation, seed sowing, the last-pit rule (extra turn or capture) and
//! the end-of-game sweep.

use crate::board::{Board, PitId, HOUSES_PER_SIDE, PIT_COUNT, SEEDS_PER_HOUSE};
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when applying a move.
///
/// All of these are user-input rejections: a failed move never mutates the
/// game state, and the same move can be retried or replaced by another.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("pit id {pit} is invalid")]
    InvalidPit { pit: PitId },

    #[error("pit {pit} does not belong to {player}")]
    WrongTurn { pit: PitId, player: Player },

    #[error("chosen pit {pit} is empty")]
    EmptyPit { pit: PitId },

    #[error("game is over")]
    GameOver,
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Moves are being played
    InProgress,

    /// One side ran out of house seeds; no further moves are legal.
    /// `winner` is `None` when both stores hold the same count.
    Finished { winner: Option<Player> },
}

/// Events that occur as a result of a successful move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEvent {
    /// Seeds were picked up and sown around the board
    Sowed {
        player: Player,
        pit: PitId,
        seeds: u32,
    },

    /// The last seed landed in the player's own store; they move again
    ExtraTurn { player: Player },

    /// The last seed landed in a previously empty own house: that seed
    /// plus everything in the mirrored opponent house went to the store
    Captured {
        player: Player,
        house: PitId,
        opposite: PitId,
        seeds: u32,
    },

    /// The turn passed to the other player
    TurnChanged { player: Player },

    /// The side to move had no seeds left; the other side's houses were
    /// swept into their store and the game ended
    GameEnded {
        swept_from: Player,
        swept_seeds: u32,
        winner: Option<Player>,
    },
}

/// The complete state of one Kalah game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// Whose turn it is
    pub current_player: Player,
    /// Current game phase
    pub phase: GamePhase,
    /// Number of successful moves applied so far
    pub turn_number: u32,
}

impl GameState {
    /// Create a new game: all houses seeded, stores empty, Player 1 to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::One,
            phase: GamePhase::InProgress,
            turn_number: 0,
        }
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Get the winner if the game is finished and was not a draw
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            GamePhase::Finished { winner } => winner,
            GamePhase::InProgress => None,
        }
    }

    /// Board rendering used on the wire: pit id to seed count as text
    pub fn status(&self) -> BTreeMap<PitId, String> {
        (1..=PIT_COUNT)
            .map(|pit| {
                let seeds = self.board.seeds(pit).unwrap_or(0);
                (pit, seeds.to_string())
            })
            .collect()
    }

    /// Serialize the full state for persistence
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a state previously written by [`GameState::to_json`]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Apply one move for the current player: pick up the seeds in `pit`
    /// and sow them counter-clockwise, skipping the opponent's store.
    ///
    /// Validation happens before any mutation, so a returned error leaves
    /// the state exactly as it was. On success the returned events
    /// describe what the move did, ending with either a turn change, an
    /// extra turn, or the end of the game.
    pub fn apply_move(&mut self, pit: PitId) -> Result<Vec<MoveEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }

        let player = self.current_player;

        if !(1..=PIT_COUNT).contains(&pit) {
            return Err(GameError::InvalidPit { pit });
        }
        if pit < player.first_house() || pit > player.store() {
            return Err(GameError::WrongTurn { pit, player });
        }
        // The range check above already stops at the store boundary, but
        // picking from one's own store is rejected explicitly.
        if pit == player.store() {
            return Err(GameError::WrongTurn { pit, player });
        }

        let picked = self.board.seeds(pit)?;
        if picked == 0 {
            // The move is rejected, not consumed: the player keeps the
            // turn and picks a different pit.
            return Err(GameError::EmptyPit { pit });
        }

        // Validated. Everything below is the atomic mutation.
        self.board.take_seeds(pit)?;

        let mut events = vec![MoveEvent::Sowed {
            player,
            pit,
            seeds: picked,
        }];

        // Simple +1 drops for all but the final seed
        let mut target = pit;
        for _ in 1..picked {
            target = next_pit(target, player);
            self.board.add_seed(target)?;
        }

        // The final seed decides the outcome
        let last = next_pit(target, player);
        if last == player.store() {
            self.board.add_seed(last)?;
            events.push(MoveEvent::ExtraTurn { player });
        } else if player.owns_house(last) && self.board.seeds(last)? == 0 {
            let opposite = Board::opposite(last)?;
            let captured = self.board.take_seeds(opposite)?;
            let store = player.store();
            let store_seeds = self.board.seeds(store)?;
            self.board.set_seeds(store, store_seeds + captured + 1)?;

            events.push(MoveEvent::Captured {
                player,
                house: last,
                opposite,
                seeds: captured + 1,
            });
            self.current_player = player.other();
            events.push(MoveEvent::TurnChanged {
                player: self.current_player,
            });
        } else {
            self.board.add_seed(last)?;
            self.current_player = player.other();
            events.push(MoveEvent::TurnChanged {
                player: self.current_player,
            });
        }

        self.turn_number += 1;
        events.extend(self.check_game_end());

        Ok(events)
    }

    /// End-of-game check, run after every successful move: if the player
    /// about to move has no seeds in their houses, the other side keeps
    /// everything left on their side and the game ends.
    fn check_game_end(&mut self) -> Option<MoveEvent> {
        if self.board.house_sum(self.current_player) != 0 {
            return None;
        }

        let other = self.current_player.other();
        let swept = self.board.sweep(other);

        let own_store = self.board.store_seeds(self.current_player);
        let other_store = self.board.store_seeds(other);
        let winner = match own_store.cmp(&other_store) {
            std::cmp::Ordering::Greater => Some(self.current_player),
            std::cmp::Ordering::Less => Some(other),
            std::cmp::Ordering::Equal => None,
        };

        self.phase = GamePhase::Finished { winner };

        Some(MoveEvent::GameEnded {
            swept_from: other,
            swept_seeds: swept,
            winner,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// The pit after `pit` in sow order for `player`: walk forward through
/// pit ids, wrap from the last pit back to the first, and step over the
/// opponent's store, which is never sown into.
fn next_pit(pit: PitId, player: Player) -> PitId {
    let advance = |p: PitId| if p == PIT_COUNT { 1 } else { p + 1 };

    let mut next = advance(pit);
    if next == player.other().store() {
        next = advance(next);
    }
    next
}

/// Seed count the conservation invariant holds the board to
pub const TOTAL_SEEDS: u32 = 2 * HOUSES_PER_SIDE as u32 * SEEDS_PER_HOUSE;

//! Game session management.
//!
//! A session wraps one `GameState` with its identifier and creation time.
//! Sessions live in server memory and are evicted once they outlive
//! [`SESSION_TTL`], matching the retention the game store is expected to
//! provide.

use kalah_core::{GameError, GameState, MoveEvent, PitId};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

use crate::protocol::GameInfo;

/// How long an idle game is kept before eviction (one week)
pub const SESSION_TTL: Duration = Duration::from_secs(3600 * 24 * 7);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game not found")]
    GameNotFound,

    #[error("{0}")]
    RejectedMove(#[from] GameError),
}

/// A single hosted game.
pub struct GameSession {
    pub id: Uuid,
    pub game: GameState,
    created_at: Instant,
}

impl GameSession {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            game: GameState::new(),
            created_at: Instant::now(),
        }
    }

    /// Apply a move for whichever player is active in this game.
    ///
    /// The original service put no player identity on the move endpoint,
    /// so any client may submit the active player's move.
    pub fn make_move(&mut self, pit: PitId) -> Result<Vec<MoveEvent>, SessionError> {
        Ok(self.game.apply_move(pit)?)
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= SESSION_TTL
    }

    pub fn to_info(&self) -> GameInfo {
        GameInfo {
            id: self.id,
            status: self.game.status(),
            active_player: self.game.current_player,
            finished: self.game.is_finished(),
            winner: self.game.winner(),
        }
    }
}

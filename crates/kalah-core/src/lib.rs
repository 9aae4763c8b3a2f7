//! Kalah - a rules engine for the classic two-player Mancala-family game
//!
//! This crate provides the core game logic for Kalah, including:
//! - Board representation with 1-based pit ids and geometry constants
//! - Player identity with derived side geometry
//! - Move validation, seed sowing, extra turns and captures
//! - End-of-game detection with the final sweep of remaining seeds
//!
//! # Architecture
//!
//! The engine is deterministic and performs no I/O: it consumes a game
//! state and a chosen pit, and produces the updated state plus a list of
//! events describing what happened. Persistence and transport live in
//! the calling layer (see the `kalah-server` crate), which owns each
//! `GameState` across requests and hands the engine exclusive access for
//! the duration of one move.
//!
//! # Modules
//!
//! - [`board`]: Pit/seed mapping and board geometry
//! - [`player`]: The two sides and their derived house ranges
//! - [`game`]: Game state machine and the move engine

pub mod board;
pub mod game;
pub mod player;

// Re-export commonly used types
pub use board::{Board, PitId, HOUSES_PER_SIDE, PIT_COUNT, SEEDS_PER_HOUSE, STORE_SPACING};
pub use game::{GameError, GamePhase, GameState, MoveEvent, TOTAL_SEEDS};
pub use player::Player;

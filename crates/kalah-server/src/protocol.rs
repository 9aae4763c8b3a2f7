//! WebSocket protocol messages for the Kalah game service.

use kalah_core::{PitId, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Create a new game
    CreateGame,

    /// Fetch the current state of a game
    GetGame { game_id: Uuid },

    /// Sow the seeds from a pit in a game
    MakeMove { game_id: Uuid, pit: PitId },

    /// Request the list of games still in progress
    ListGames,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with assigned client ID
    Welcome { client_id: Uuid },

    /// Game created successfully
    GameCreated { game: GameInfo },

    /// Current game state
    GameState { game: GameInfo },

    /// Move applied (or rejected)
    MoveResult {
        success: bool,
        events: Vec<serde_json::Value>,
        error: Option<String>,
    },

    /// A game finished
    GameOver {
        game_id: Uuid,
        winner: Option<Player>,
    },

    /// List of games in progress
    GameList { games: Vec<GameInfo> },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}

/// Game information for clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: Uuid,
    /// Seed count per pit, keyed by 1-based pit id
    pub status: BTreeMap<PitId, String>,
    pub active_player: Player,
    pub finished: bool,
    pub winner: Option<Player>,
}

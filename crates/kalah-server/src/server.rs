//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, GameInfo, ServerMessage};
use crate::session::GameSession;
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// All hosted games. A move on a game runs under that game's map
    /// entry lock, so moves within one game are serialized while distinct
    /// games proceed independently.
    pub games: DashMap<Uuid, GameSession>,
    /// Mapping from client ID to their message sender
    pub client_senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            client_senders: DashMap::new(),
        }
    }

    /// Send a message to a specific client.
    pub fn send_to_client(&self, client_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.client_senders.get(&client_id) {
            let _ = sender.send(msg);
        }
    }

    /// Get list of games still being played.
    pub fn get_open_games(&self) -> Vec<GameInfo> {
        self.games
            .iter()
            .filter(|s| !s.game.is_finished())
            .map(|s| s.to_info())
            .collect()
    }

    /// Drop every session past its retention window.
    pub fn reap_expired(&self) -> usize {
        let before = self.games.len();
        self.games.retain(|_, session| !session.is_expired());
        before - self.games.len()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Kalah server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Assign a client ID
    let client_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.client_senders.insert(client_id, tx);

    // Send welcome message
    let welcome = ServerMessage::Welcome { client_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text.into())).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Handle incoming messages
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                if let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) {
                    handle_message(client_id, client_msg, &state);
                } else {
                    warn!("Invalid message from {}: {}", client_id, text);
                }
            }
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", client_id);
                break;
            }
            Ok(Message::Ping(data)) => {
                state.send_to_client(client_id, ServerMessage::Pong);
                let _ = data; // Just consume it
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    // Clean up on disconnect; games outlive their creator's connection
    state.client_senders.remove(&client_id);
    send_task.abort();

    info!("Connection closed for {}", client_id);
    Ok(())
}

/// Handle a client message.
fn handle_message(client_id: Uuid, msg: ClientMessage, state: &Arc<ServerState>) {
    match msg {
        ClientMessage::CreateGame => {
            let game_id = Uuid::new_v4();
            let session = GameSession::new(game_id);
            let info = session.to_info();

            state.games.insert(game_id, session);
            info!("Client {} created game {}", client_id, game_id);

            state.send_to_client(client_id, ServerMessage::GameCreated { game: info });
        }

        ClientMessage::GetGame { game_id } => {
            if let Some(session) = state.games.get(&game_id) {
                let info = session.to_info();
                state.send_to_client(client_id, ServerMessage::GameState { game: info });
            } else {
                state.send_to_client(
                    client_id,
                    ServerMessage::Error {
                        message: "game not found".to_string(),
                    },
                );
            }
        }

        ClientMessage::MakeMove { game_id, pit } => {
            if let Some(mut session) = state.games.get_mut(&game_id) {
                match session.make_move(pit) {
                    Ok(events) => {
                        let info = session.to_info();
                        let winner = session.game.winner();
                        let finished = session.game.is_finished();
                        drop(session);

                        state.send_to_client(
                            client_id,
                            ServerMessage::MoveResult {
                                success: true,
                                events: events
                                    .iter()
                                    .filter_map(|e| serde_json::to_value(e).ok())
                                    .collect(),
                                error: None,
                            },
                        );
                        state.send_to_client(client_id, ServerMessage::GameState { game: info });

                        if finished {
                            state.send_to_client(
                                client_id,
                                ServerMessage::GameOver { game_id, winner },
                            );
                        }
                    }
                    Err(e) => {
                        state.send_to_client(
                            client_id,
                            ServerMessage::MoveResult {
                                success: false,
                                events: vec![],
                                error: Some(e.to_string()),
                            },
                        );
                    }
                }
            } else {
                state.send_to_client(
                    client_id,
                    ServerMessage::Error {
                        message: "game not found".to_string(),
                    },
                );
            }
        }

        ClientMessage::ListGames => {
            let games = state.get_open_games();
            state.send_to_client(client_id, ServerMessage::GameList { games });
        }

        ClientMessage::Ping => {
            state.send_to_client(client_id, ServerMessage::Pong);
        }
    }
}

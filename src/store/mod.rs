//! Persistence boundary. The rule engine never touches storage; the session loop
//! loads a game once per room, saves it after accepted moves and drops it once a king falls.

use crate::chess_board::{ChessBoard, ChessField, Color, Piece};
use crate::game::Game;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

mod json_file;
mod memory;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

const MAX_ROOM_NAME_LEN: usize = 32;
pub const DEFAULT_ROOM: &str = "default";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed session file '{path}': {source}")]
    Serde {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored position of room '{room}' does not match its hash")]
    CorruptSnapshot { room: String },

    #[error("invalid room name '{0}': use 1-32 letters, digits, '_' or '-'")]
    InvalidRoomName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(name: &str) -> Result<Self, StoreError> {
        let valid = !name.is_empty()
            && name.len() <= MAX_ROOM_NAME_LEN
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(StoreError::InvalidRoomName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomName {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub directory: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("rooms"),
        }
    }
}

pub trait SessionStore {
    fn load_board(&self, room: &RoomName) -> Result<Option<Vec<(ChessField, Piece)>>, StoreError>;
    fn load_turn(&self, room: &RoomName) -> Result<Option<Color>, StoreError>;
    fn save_board(&mut self, room: &RoomName, snapshot: &[(ChessField, Piece)]) -> Result<(), StoreError>;
    fn save_turn(&mut self, room: &RoomName, color: Color) -> Result<(), StoreError>;
    fn delete_session(&mut self, room: &RoomName) -> Result<(), StoreError>;

    /// Board and turn together. Stores that can should write both at once, so a
    /// failure never leaves a sealed record with the new board and the old turn.
    fn save_session(&mut self, room: &RoomName, snapshot: &[(ChessField, Piece)], turn: Color) -> Result<(), StoreError> {
        self.save_board(room, snapshot)?;
        self.save_turn(room, turn)
    }
}

/// Rebuilds the stored game of `room`, `None` when nothing was saved.
pub fn load_game<S: SessionStore + ?Sized>(store: &S, room: &RoomName) -> Result<Option<Game>, StoreError> {
    let Some(pieces) = store.load_board(room)? else {
        return Ok(None);
    };
    let turn = store.load_turn(room)?.unwrap_or(Color::White);
    Ok(Some(Game::from_parts(ChessBoard::from_pieces(pieces), turn)))
}

pub fn save_game<S: SessionStore + ?Sized>(store: &mut S, room: &RoomName, game: &Game) -> Result<(), StoreError> {
    store.save_session(room, &game.board().snapshot(), game.turn())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct BoardEntry {
    square: ChessField,
    #[serde(flatten)]
    piece: Piece,
}

/// On-disk shape of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionRecord {
    turn: Color,
    position_hash: u64,
    pieces: Vec<BoardEntry>,
}

impl SessionRecord {
    fn new() -> Self {
        Self {
            turn: Color::White,
            position_hash: 0,
            pieces: Vec::new(),
        }
    }

    fn board(&self) -> ChessBoard {
        ChessBoard::from_pieces(self.pieces.iter().map(|entry| (entry.square, entry.piece)))
    }

    fn set_pieces(&mut self, snapshot: &[(ChessField, Piece)]) {
        self.pieces = snapshot
            .iter()
            .map(|&(square, piece)| BoardEntry { square, piece })
            .collect();
        self.seal();
    }

    fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
        self.seal();
    }

    fn set_session(&mut self, snapshot: &[(ChessField, Piece)], turn: Color) {
        self.turn = turn;
        self.set_pieces(snapshot);
    }

    fn seal(&mut self) {
        self.position_hash = self.board().hash(self.turn);
    }

    fn verify(&self, room: &RoomName) -> Result<(), StoreError> {
        let distinct = self.board().piece_count() == self.pieces.len();
        if distinct && self.board().hash(self.turn) == self.position_hash {
            Ok(())
        } else {
            Err(StoreError::CorruptSnapshot {
                room: room.to_string(),
            })
        }
    }

    fn snapshot(&self) -> Vec<(ChessField, Piece)> {
        self.pieces.iter().map(|entry| (entry.square, entry.piece)).collect()
    }
}

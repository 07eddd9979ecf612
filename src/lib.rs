//! Two-player chess rule engine: board, movement rules, move validation,
//! turn handling and material scoring, plus the console session and
//! persistence collaborators built around it.

pub mod chess_board;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod score;
pub mod store;
pub mod ui;

pub use chess_board::{ChessBoard, ChessField, Color, Piece, PieceType};
pub use error::ChessError;
pub use game::{Game, GameOutcome, GameState, Verdict};
pub use score::{ScorePolicy, ScoreResult};

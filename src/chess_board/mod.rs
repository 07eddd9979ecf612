pub mod fen;
pub mod zobrist_hash;
pub use zobrist_hash::ZobristHash;
pub use zobrist_hash::ZOBRIST;
pub mod model;
pub use model::{ChessField, Color, Piece, PieceType, Square, BOARD_SIZE};

mod chess_board;
mod movement;
pub mod validator;
pub use chess_board::ChessBoard;
pub use validator::validate;

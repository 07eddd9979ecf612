use super::{ChessBoard, ChessField, Color};
use crate::error::ChessError;

/// Decides whether `mover` may play `from` -> `to` on `board`. Never mutates the board.
///
/// Checks run in a fixed order and the first failure wins:
/// same square, missing or foreign piece, own piece on the destination,
/// piece geometry (capture variant when the destination holds an opponent),
/// and finally the path for pieces that cannot jump.
pub fn validate(board: &ChessBoard, from: ChessField, to: ChessField, mover: Color) -> Result<(), ChessError> {
    if from == to {
        return Err(ChessError::NoOpMove);
    }

    let piece = match board.piece_at(from) {
        Some(piece) if piece.color == mover => piece,
        _ => return Err(ChessError::NoPieceOrWrongTurn),
    };

    if board.is_occupied_by_color(to, mover) {
        return Err(ChessError::FriendlyCapture);
    }

    let geometry_ok = if board.is_occupied_by_color(to, mover.opposite()) {
        piece.can_capture(from, to)
    } else {
        piece.can_move(from, to)
    };
    if !geometry_ok {
        return Err(ChessError::IllegalGeometry);
    }

    if piece.needs_clear_path(from, to) && !board.is_path_clear(from, to) {
        return Err(ChessError::Blocked);
    }

    Ok(())
}

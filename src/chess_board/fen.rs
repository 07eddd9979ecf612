use super::ChessBoard;
use super::{ChessField, Color, Piece, PieceType, Square};
use crate::error::ChessError;

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// Parses the placement field and the optional active color field of a FEN string.
/// Castling, en passant and clock fields are accepted and ignored.
pub fn from_fen(fen: &str) -> Result<(ChessBoard, Color), ChessError> {
    let mut board = ChessBoard::new();
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let placement = parts
        .first()
        .ok_or_else(|| ChessError::Parse(String::from("Invalid FEN string: empty")))?;

    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::Parse(String::from("Invalid FEN string: expected 8 rows")));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let rank = 7 - row_index as u8;
        let mut file = 0u8;

        for c in row.chars() {
            if file > 7 {
                return Err(ChessError::Parse(String::from("Invalid FEN string: too many columns")));
            }
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::Parse(format!("Invalid piece character in FEN string: {}", c)))?;
                // a pawn off its start rank must have moved
                let moved = piece.kind == PieceType::Pawn && rank != piece.color.pawn_start_rank();
                board.squares[rank as usize][file as usize] = Square::Occupied(piece.with_moved(moved));
                file += 1;
            }
        }
        if file > 8 {
            return Err(ChessError::Parse(format!("Too many squares in row {} when parsing FEN", row_index)));
        }
    }

    let active_color = match parts.get(1) {
        None | Some(&"w") => Color::White,
        Some(&"b") => Color::Black,
        Some(_) => return Err(ChessError::Parse(String::from("Invalid FEN string: invalid active color."))),
    };

    Ok((board, active_color))
}

pub fn to_fen(board: &ChessBoard) -> String {
    let mut board_representation = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0;

        for file in 0..8u8 {
            let field = ChessField { rank, file };
            match board.piece_at(field) {
                Some(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if rank > 0 {
            board_representation.push('/');
        }
    }

    board_representation
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fen_empty_board() {
        let (board, color) = ChessBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").expect("Failed to parse FEN");

        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(board.squares[row][col], Square::Empty);
            }
        }
        assert_eq!(color, Color::White);
    }

    #[test]
    fn fen_initial_board_matches_standard_layout() {
        let (board, color) = ChessBoard::from_fen(INITIAL_POSITION).expect("Failed to parse FEN");
        assert_eq!(board, ChessBoard::standard());
        assert_eq!(color, Color::White);
    }

    #[test]
    fn fen_pawn_off_start_rank_is_moved() {
        let (board, _) = ChessBoard::from_fen("8/8/8/8/4P3/8/3P4/8 b").unwrap();
        let advanced = board.piece_at(ChessField::from_algebraic("e4").unwrap()).unwrap();
        let home = board.piece_at(ChessField::from_algebraic("d2").unwrap()).unwrap();
        assert!(advanced.moved);
        assert!(!home.moved);
    }

    #[test]
    fn fen_active_color() {
        let (_, color) = ChessBoard::from_fen("8/8/8/8/8/8/8/8 b KQkq - 0 1").unwrap();
        assert_eq!(color, Color::Black);
        assert!(ChessBoard::from_fen("8/8/8/8/8/8/8/8 x").is_err());
    }

    #[test]
    fn fen_invalid_square() {
        let result = ChessBoard::from_fen("8/8/8/8/8/8/8/X7 w - - 0 1");
        assert!(matches!(result, Err(ChessError::Parse(_))));
    }

    #[test]
    fn fen_invalid_fen_extra_columns() {
        let fen = "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";
        assert!(ChessBoard::from_fen(fen).is_err());
    }

    #[test]
    fn fen_missing_rows() {
        assert!(ChessBoard::from_fen("rnbqkbnr/pppppppp/8 w").is_err());
        assert!(ChessBoard::from_fen("").is_err());
    }

    #[test]
    fn test_to_fen_initial_position() {
        assert_eq!(ChessBoard::standard().to_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn test_to_fen_custom_position() {
        let placement = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR";
        let (board, _) = ChessBoard::from_fen(placement).unwrap();
        assert_eq!(board.to_fen(), placement);
    }
}

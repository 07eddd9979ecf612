use super::{ChessField, Piece, PieceType};

const KNIGHT_DELTAS: [(i8, i8); 2] = [(1, 2), (2, 1)];

fn is_straight(df: i8, dr: i8) -> bool {
    (df == 0) != (dr == 0)
}

fn is_diagonal(df: i8, dr: i8) -> bool {
    df != 0 && df.abs() == dr.abs()
}

impl PieceType {
    fn can_reach(&self, df: i8, dr: i8) -> bool {
        match self {
            PieceType::King => df.abs().max(dr.abs()) == 1,
            PieceType::Queen => is_straight(df, dr) || is_diagonal(df, dr),
            PieceType::Rook => is_straight(df, dr),
            PieceType::Bishop => is_diagonal(df, dr),
            PieceType::Knight => KNIGHT_DELTAS.contains(&(df.abs(), dr.abs())),
            // pawn geometry depends on color and moved state, see `Piece`
            PieceType::Pawn => false,
        }
    }
}

impl Piece {
    /// Geometry of a non-capturing move, ignoring what stands on the board.
    pub fn can_move(&self, from: ChessField, to: ChessField) -> bool {
        let (df, dr) = from.delta_to(to);
        match self.kind {
            PieceType::Pawn => {
                let forward = self.color.forward();
                df == 0 && (dr == forward || (dr == 2 * forward && !self.moved))
            }
            kind => kind.can_reach(df, dr),
        }
    }

    /// Geometry of a capture onto an opponent's piece.
    pub fn can_capture(&self, from: ChessField, to: ChessField) -> bool {
        let (df, dr) = from.delta_to(to);
        match self.kind {
            PieceType::Pawn => df.abs() == 1 && dr == self.color.forward(),
            kind => kind.can_reach(df, dr),
        }
    }

    /// Whether the squares strictly between `from` and `to` must be empty.
    pub fn needs_clear_path(&self, from: ChessField, to: ChessField) -> bool {
        match self.kind {
            PieceType::Pawn => from.delta_to(to).1.abs() == 2,
            kind => kind.is_sliding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_board::Color;

    fn f(s: &str) -> ChessField {
        ChessField::from_algebraic(s).unwrap()
    }

    fn piece(color: Color, kind: PieceType) -> Piece {
        Piece::new(color, kind)
    }

    #[test]
    fn test_king_moves_one_square() {
        let king = piece(Color::White, PieceType::King);
        for to in ["d3", "d4", "d5", "e3", "e5", "f3", "f4", "f5"] {
            assert!(king.can_move(f("e4"), f(to)), "e4-{}", to);
        }
        assert!(!king.can_move(f("e4"), f("e6")));
        assert!(!king.can_move(f("e4"), f("g4")));
        assert!(!king.can_move(f("e4"), f("e4")));
    }

    #[test]
    fn test_queen_moves_lines_and_diagonals() {
        let queen = piece(Color::Black, PieceType::Queen);
        assert!(queen.can_move(f("d1"), f("d8")));
        assert!(queen.can_move(f("d1"), f("a1")));
        assert!(queen.can_move(f("d1"), f("h5")));
        assert!(!queen.can_move(f("d1"), f("e3")));
        assert!(!queen.can_move(f("d1"), f("d1")));
    }

    #[test]
    fn test_rook_moves_straight_only() {
        let rook = piece(Color::White, PieceType::Rook);
        assert!(rook.can_move(f("a1"), f("a8")));
        assert!(rook.can_move(f("a1"), f("h1")));
        assert!(!rook.can_move(f("a1"), f("b2")));
    }

    #[test]
    fn test_bishop_moves_diagonal_only() {
        let bishop = piece(Color::White, PieceType::Bishop);
        assert!(bishop.can_move(f("c1"), f("h6")));
        assert!(bishop.can_move(f("c1"), f("a3")));
        assert!(!bishop.can_move(f("c1"), f("c2")));
    }

    #[test]
    fn test_knight_jumps() {
        let knight = piece(Color::Black, PieceType::Knight);
        assert!(knight.can_move(f("b8"), f("c6")));
        assert!(knight.can_move(f("b8"), f("a6")));
        assert!(knight.can_move(f("b8"), f("d7")));
        assert!(!knight.can_move(f("b8"), f("c7")));
        assert!(!knight.can_move(f("b8"), f("b6")));
    }

    #[test]
    fn test_pawn_forward_and_double_step() {
        let white = piece(Color::White, PieceType::Pawn);
        assert!(white.can_move(f("e2"), f("e3")));
        assert!(white.can_move(f("e2"), f("e4")));
        assert!(!white.can_move(f("e2"), f("e5")));
        assert!(!white.can_move(f("e2"), f("e1")));
        assert!(!white.with_moved(true).can_move(f("e3"), f("e5")));

        let black = piece(Color::Black, PieceType::Pawn);
        assert!(black.can_move(f("d7"), f("d5")));
        assert!(black.can_move(f("d7"), f("d6")));
        assert!(!black.can_move(f("d7"), f("d8")));
    }

    #[test]
    fn test_pawn_captures_diagonally_forward() {
        let white = piece(Color::White, PieceType::Pawn);
        assert!(white.can_capture(f("e4"), f("d5")));
        assert!(white.can_capture(f("e4"), f("f5")));
        assert!(!white.can_capture(f("e4"), f("e5")));
        assert!(!white.can_capture(f("e4"), f("d3")));
        assert!(!white.can_move(f("e4"), f("d5")));

        let black = piece(Color::Black, PieceType::Pawn);
        assert!(black.can_capture(f("e5"), f("d4")));
        assert!(!black.can_capture(f("e5"), f("d6")));
    }

    #[test]
    fn test_clear_path_requirement() {
        assert!(piece(Color::White, PieceType::Rook).needs_clear_path(f("a1"), f("a2")));
        assert!(!piece(Color::White, PieceType::Knight).needs_clear_path(f("b1"), f("c3")));
        assert!(!piece(Color::White, PieceType::King).needs_clear_path(f("e1"), f("e2")));
        assert!(piece(Color::White, PieceType::Pawn).needs_clear_path(f("e2"), f("e4")));
        assert!(!piece(Color::White, PieceType::Pawn).needs_clear_path(f("e2"), f("e3")));
    }
}

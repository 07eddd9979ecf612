use crate::chess_board::{ChessBoard, Color, PieceType};

/// Material values per piece kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePolicy {
    pub pawn: f64,
    /// Value of a pawn sharing its file with another pawn of the same color.
    pub doubled_pawn: f64,
    pub knight: f64,
    pub bishop: f64,
    pub rook: f64,
    pub queen: f64,
    pub king: f64,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            pawn: 1.0,
            doubled_pawn: 0.5,
            knight: 2.5,
            bishop: 3.0,
            rook: 5.0,
            queen: 9.0,
            king: 0.0,
        }
    }
}

impl ScorePolicy {
    pub fn value_of(&self, kind: PieceType) -> f64 {
        match kind {
            PieceType::Pawn => self.pawn,
            PieceType::Knight => self.knight,
            PieceType::Bishop => self.bishop,
            PieceType::Rook => self.rook,
            PieceType::Queen => self.queen,
            PieceType::King => self.king,
        }
    }

    pub fn score_of(&self, board: &ChessBoard, color: Color) -> f64 {
        let mut pawns_per_file = [0u8; 8];
        let mut total = 0.0;

        for (field, piece) in board.pieces_of(color) {
            if piece.kind == PieceType::Pawn {
                pawns_per_file[field.file as usize] += 1;
            } else {
                total += self.value_of(piece.kind);
            }
        }

        for count in pawns_per_file {
            let per_pawn = if count > 1 { self.doubled_pawn } else { self.pawn };
            total += f64::from(count) * per_pawn;
        }

        total
    }

    pub fn score(&self, board: &ChessBoard) -> ScoreResult {
        ScoreResult {
            white: self.score_of(board, Color::White),
            black: self.score_of(board, Color::Black),
        }
    }
}

/// Material score of `color` under the default policy.
pub fn score_of(board: &ChessBoard, color: Color) -> f64 {
    ScorePolicy::default().score_of(board, color)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub white: f64,
    pub black: f64,
}

impl ScoreResult {
    pub fn get(&self, color: Color) -> f64 {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// The color with the strictly higher score, `None` on a tie.
    pub fn leader(&self) -> Option<Color> {
        if self.white > self.black {
            Some(Color::White)
        } else if self.black > self.white {
            Some(Color::Black)
        } else {
            None
        }
    }
}

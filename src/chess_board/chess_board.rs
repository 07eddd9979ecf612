use super::zobrist_hash::ZOBRIST;
use super::{fen, ChessField, Color, Piece, PieceType, Square};
use crate::error::ChessError;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Cells indexed `[rank][file]`. At most one piece per cell by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub squares: [[Square; 8]; 8],
}

impl ChessBoard {
    /// Creates an empty chess board
    pub fn new() -> Self {
        Self {
            squares: [[Square::Empty; 8]; 8],
        }
    }

    /// The standard 32 piece starting layout.
    pub fn standard() -> Self {
        let mut board = Self::new();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][file] = Square::Occupied(Piece::new(Color::White, *kind));
            board.squares[1][file] = Square::Occupied(Piece::new(Color::White, PieceType::Pawn));
            board.squares[6][file] = Square::Occupied(Piece::new(Color::Black, PieceType::Pawn));
            board.squares[7][file] = Square::Occupied(Piece::new(Color::Black, *kind));
        }
        board
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), ChessError> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Builds a board from an enumeration such as one produced by `snapshot`.
    pub fn from_pieces<I: IntoIterator<Item = (ChessField, Piece)>>(pieces: I) -> Self {
        let mut board = Self::new();
        for (field, piece) in pieces {
            board.place(field, piece);
        }
        board
    }

    pub fn piece_at(&self, field: ChessField) -> Option<Piece> {
        self.squares[field.rank as usize][field.file as usize].piece()
    }

    /// Puts `piece` on `field`, replacing any occupant. Meant for setup and restore.
    pub fn place(&mut self, field: ChessField, piece: Piece) {
        self.squares[field.rank as usize][field.file as usize] = Square::Occupied(piece);
    }

    pub fn remove(&mut self, field: ChessField) -> Option<Piece> {
        let cell = &mut self.squares[field.rank as usize][field.file as usize];
        let piece = cell.piece();
        *cell = Square::Empty;
        piece
    }

    /// Moves the piece on `from` to `to` and marks it as moved.
    /// Returns the piece that stood on `to`, if any.
    pub fn relocate(&mut self, from: ChessField, to: ChessField) -> Result<Option<Piece>, ChessError> {
        let piece = self.piece_at(from).ok_or(ChessError::EmptySource)?;
        if from == to {
            return Ok(None);
        }
        let captured = self.piece_at(to);
        self.squares[from.rank as usize][from.file as usize] = Square::Empty;
        self.place(to, piece.with_moved(true));
        Ok(captured)
    }

    /// True iff every square strictly between `from` and `to` is empty.
    /// Only meaningful along a rank, file or diagonal; other pairs have nothing in between.
    pub fn is_path_clear(&self, from: ChessField, to: ChessField) -> bool {
        let (df, dr) = from.delta_to(to);
        let aligned = df == 0 || dr == 0 || df.abs() == dr.abs();
        if !aligned {
            return true;
        }
        let (step_file, step_rank) = (df.signum(), dr.signum());
        let steps = df.abs().max(dr.abs());
        (1..steps).all(|i| match from.offset(step_file * i, step_rank * i) {
            Some(field) => self.piece_at(field).is_none(),
            None => true,
        })
    }

    pub fn is_occupied_by_color(&self, field: ChessField, color: Color) -> bool {
        matches!(self.piece_at(field), Some(piece) if piece.color == color)
    }

    /// Returns an iterator over all pieces on the chessboard along with their coordinates.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        ChessField::all().filter_map(move |field| self.piece_at(field).map(|piece| (field, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.pieces_with_coordinates().filter(move |(_, piece)| piece.color == color)
    }

    pub fn find_king_position(&self, color: Color) -> Option<ChessField> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceType::King)
            .map(|(field, _)| field)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces_with_coordinates().count()
    }

    /// Full enumeration of occupied cells, the serialization surface for persistence.
    pub fn snapshot(&self) -> Vec<(ChessField, Piece)> {
        self.pieces_with_coordinates().collect()
    }

    pub fn hash(&self, side_to_move: Color) -> u64 {
        ZOBRIST.calculate_hash(self, side_to_move)
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::standard()
    }
}

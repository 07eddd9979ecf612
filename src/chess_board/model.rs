use crate::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn step for this side.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Rook, bishop and queen: legality depends on every square in between being empty.
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceType::Rook | PieceType::Bishop | PieceType::Queen)
    }

    pub fn is_promotion_target(&self) -> bool {
        !matches!(self, PieceType::Pawn | PieceType::King)
    }

    pub fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

impl FromStr for PieceType {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p" | "pawn" => Ok(PieceType::Pawn),
            "n" | "knight" => Ok(PieceType::Knight),
            "b" | "bishop" => Ok(PieceType::Bishop),
            "r" | "rook" => Ok(PieceType::Rook),
            "q" | "queen" => Ok(PieceType::Queen),
            "k" | "king" => Ok(PieceType::King),
            _ => Err(ChessError::Parse(format!("unknown piece kind: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    #[serde(default)]
    pub moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind, moved: false }
    }

    pub fn with_moved(mut self, moved: bool) -> Self {
        self.moved = moved;
        self
    }

    pub fn to_char(&self) -> char {
        let c = match self.kind {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        };
        if self.color == Color::White {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Piece::new(color, kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

impl Square {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Square::Occupied(piece) => Some(*piece),
            Square::Empty => None,
        }
    }
}

/// One of the 64 cells, `file` 0..8 is a..h and `rank` 0..8 is 1..8.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChessField {
    pub rank: u8,
    pub file: u8,
}

impl ChessField {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < BOARD_SIZE && rank < BOARD_SIZE {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, ChessError> {
        let mut chars = algebraic.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => (file, rank),
            _ => return Err(ChessError::Parse(format!("invalid square: {}", algebraic))),
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(ChessError::Parse(format!("invalid square: {}", algebraic)));
        }
        Ok(Self {
            rank: rank as u8 - b'1',
            file: file as u8 - b'a',
        })
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.rank, self.file)
    }

    /// The field `file_delta` files and `rank_delta` ranks away, if still on the board.
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = (self.file as i8).checked_add(file_delta)?;
        let rank = (self.rank as i8).checked_add(rank_delta)?;
        if file < 0 || rank < 0 {
            return None;
        }
        Self::new(file as u8, rank as u8)
    }

    /// Signed `(file, rank)` distance from `self` to `other`.
    pub fn delta_to(&self, other: ChessField) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    pub fn all() -> impl Iterator<Item = ChessField> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| ChessField { rank, file }))
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

impl FromStr for ChessField {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl TryFrom<String> for ChessField {
    type Error = ChessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_algebraic(&value)
    }
}

impl From<ChessField> for String {
    fn from(field: ChessField) -> Self {
        field.as_algebraic()
    }
}

pub fn to_algebraic_square(rank: u8, file: u8) -> String {
    let file = (b'a' + file) as char;
    let rank = (rank + 1).to_string();
    format!("{}{}", file, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_conversion() {
        let field = ChessField::from_algebraic("b2").unwrap();
        assert_eq!(field, ChessField::new(1, 1).unwrap());
        assert_eq!(field.as_algebraic(), "b2");
        assert_eq!(ChessField::from_algebraic("h8").unwrap(), ChessField::new(7, 7).unwrap());
    }

    #[test]
    fn test_malformed_squares_are_rejected() {
        for input in ["", "a", "a9", "i1", "a0", "a10", "A1", "11"] {
            assert!(
                matches!(ChessField::from_algebraic(input), Err(ChessError::Parse(_))),
                "{} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_out_of_range_construction_fails() {
        assert!(ChessField::new(8, 0).is_none());
        assert!(ChessField::new(0, 8).is_none());
        assert!(ChessField::new(7, 7).is_some());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = ChessField::from_algebraic("a1").unwrap();
        assert_eq!(a1.offset(1, 2), Some(ChessField::from_algebraic("b3").unwrap()));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, 8), None);

        let h8 = ChessField::from_algebraic("h8").unwrap();
        assert_eq!(h8.offset(i8::MAX, 0), None);
        assert_eq!(h8.offset(0, i8::MAX), None);
        assert_eq!(a1.offset(i8::MIN, i8::MIN), None);
    }

    #[test]
    fn test_piece_char_round_trip() {
        assert_eq!(Piece::from_char('q'), Some(Piece::new(Color::Black, PieceType::Queen)));
        assert_eq!(Piece::new(Color::White, PieceType::Knight).to_char(), 'N');
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn test_piece_type_from_str() {
        assert_eq!("queen".parse::<PieceType>().unwrap(), PieceType::Queen);
        assert_eq!("N".parse::<PieceType>().unwrap(), PieceType::Knight);
        assert!("dragon".parse::<PieceType>().is_err());
    }

    #[test]
    fn test_all_fields_cover_board() {
        assert_eq!(ChessField::all().count(), 64);
    }
}

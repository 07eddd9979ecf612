use super::{ChessBoard, Color, Piece};
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const BOARD_SIZE: usize = 8;

pub struct ZobristHash {
    piece_keys: [[[u64; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
    side_to_move_key: u64,
}

impl ZobristHash {
    fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut piece_keys = [[[0; BOARD_SIZE * BOARD_SIZE]; 6]; 2];
        for color_keys in &mut piece_keys {
            for piece_type_keys in color_keys {
                for square_key in piece_type_keys {
                    *square_key = rng.gen();
                }
            }
        }

        ZobristHash {
            piece_keys,
            side_to_move_key: rng.gen(),
        }
    }

    fn piece_key(&self, piece: Piece, square_index: usize) -> u64 {
        let color_index = match piece.color {
            Color::White => 0,
            Color::Black => 1,
        };
        self.piece_keys[color_index][piece.kind.index()][square_index]
    }

    /// Hash of the placement and the side to move. The `moved` flag is not part of it.
    pub fn calculate_hash(&self, board: &ChessBoard, side_to_move: Color) -> u64 {
        let mut hash = board
            .pieces_with_coordinates()
            .fold(0, |hash, (field, piece)| {
                hash ^ self.piece_key(piece, field.rank as usize * BOARD_SIZE + field.file as usize)
            });

        if side_to_move == Color::Black {
            hash ^= self.side_to_move_key;
        }

        hash
    }
}

lazy_static! {
    pub static ref ZOBRIST: ZobristHash = ZobristHash::new(42);
}

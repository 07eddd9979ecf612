use crate::chess_board::{validate, ChessBoard, ChessField, Color, Piece, PieceType};
use crate::error::ChessError;
use crate::score::{ScorePolicy, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    /// A king has left the board.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Win,
    Lose,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub white: Verdict,
    pub black: Verdict,
}

impl GameOutcome {
    fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameOutcome { white: Verdict::Win, black: Verdict::Lose },
            Color::Black => GameOutcome { white: Verdict::Lose, black: Verdict::Win },
        }
    }

    pub fn verdict(&self, color: Color) -> Verdict {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// One game session: the board, the side to move and the scoring policy.
#[derive(Debug, Clone)]
pub struct Game {
    board: ChessBoard,
    turn: Color,
    policy: ScorePolicy,
}

impl Game {
    /// Standard layout, white to move.
    pub fn new() -> Self {
        Self::from_parts(ChessBoard::standard(), Color::White)
    }

    /// Restores a game from a stored or hand-built position.
    pub fn from_parts(board: ChessBoard, turn: Color) -> Self {
        Self {
            board,
            turn,
            policy: ScorePolicy::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let (board, turn) = ChessBoard::from_fen(fen)?;
        Ok(Self::from_parts(board, turn))
    }

    pub fn with_policy(mut self, policy: ScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn board(&self) -> &ChessBoard {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn state(&self) -> GameState {
        if self.is_terminal() {
            GameState::Finished
        } else {
            GameState::InProgress
        }
    }

    /// True iff either king is missing from the board.
    pub fn is_terminal(&self) -> bool {
        self.board.find_king_position(Color::White).is_none() || self.board.find_king_position(Color::Black).is_none()
    }

    /// Plays `from` -> `to` for the side to move and hands the turn over.
    /// Returns the captured piece. On error nothing changes.
    pub fn make_move(&mut self, from: ChessField, to: ChessField) -> Result<Option<Piece>, ChessError> {
        if self.is_terminal() {
            return Err(ChessError::SessionFinished);
        }
        validate(&self.board, from, to, self.turn)?;
        let captured = self.board.relocate(from, to)?;
        self.turn = self.turn.opposite();
        Ok(captured)
    }

    /// A pawn standing on the last rank as seen from its own side.
    pub fn can_promote(&self, field: ChessField) -> bool {
        match self.board.piece_at(field) {
            Some(piece) => piece.kind == PieceType::Pawn && field.rank == piece.color.promotion_rank(),
            None => false,
        }
    }

    pub fn promote(&mut self, field: ChessField, target: PieceType) -> Result<(), ChessError> {
        if self.is_terminal() {
            return Err(ChessError::SessionFinished);
        }
        if !target.is_promotion_target() || !self.can_promote(field) {
            return Err(ChessError::InvalidPromotionTarget);
        }
        let pawn = self.board.piece_at(field).ok_or(ChessError::InvalidPromotionTarget)?;
        self.board.place(field, Piece::new(pawn.color, target).with_moved(true));
        Ok(())
    }

    pub fn score(&self) -> ScoreResult {
        self.policy.score(&self.board)
    }

    pub fn score_of(&self, color: Color) -> f64 {
        self.policy.score_of(&self.board, color)
    }

    /// A missing king decides the game; otherwise the material score does.
    pub fn outcome(&self) -> GameOutcome {
        let white_king = self.board.find_king_position(Color::White).is_some();
        let black_king = self.board.find_king_position(Color::Black).is_some();
        match (white_king, black_king) {
            (true, false) => return GameOutcome::won_by(Color::White),
            (false, true) => return GameOutcome::won_by(Color::Black),
            _ => {}
        }
        match self.score().leader() {
            Some(color) => GameOutcome::won_by(color),
            None => GameOutcome {
                white: Verdict::Draw,
                black: Verdict::Draw,
            },
        }
    }

    pub fn position_hash(&self) -> u64 {
        self.board.hash(self.turn)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

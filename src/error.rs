use thiserror::Error;

/// Failures of the rule engine. Every failing operation leaves the game untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("source and destination are the same square")]
    NoOpMove,

    #[error("no piece of the side to move on the source square")]
    NoPieceOrWrongTurn,

    #[error("destination is occupied by a piece of the same color")]
    FriendlyCapture,

    #[error("the piece cannot move that way")]
    IllegalGeometry,

    #[error("the path to the destination is blocked")]
    Blocked,

    #[error("source square is empty")]
    EmptySource,

    #[error("promotion is not possible there or to that piece")]
    InvalidPromotionTarget,

    #[error("the game is already finished")]
    SessionFinished,
}
